use std::collections::HashMap;
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;

/// Path of the stub manuscript detail page; targets are selected with `?projet=`.
pub const MANUSCRIPT_PATH: &str = "/consulter/manuscrit/detail_manuscrit.php";

/// Minimal stand-in for the catalog: serves one canned page per project id,
/// answers 500 for ids listed as broken and 404 for everything else.
pub struct CatalogStub {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    shutdown_tx: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub user_agent: Option<String>,
    pub accept_language: Option<String>,
}

impl CatalogStub {
    pub fn spawn(pages: HashMap<u64, String>, broken: Vec<u64>) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start catalog stub server");
        let addr = server.server_addr();
        let base_url = format!("http://{addr}{MANUSCRIPT_PATH}");

        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }

                let request = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };

                let header = |name: &str| {
                    request
                        .headers()
                        .iter()
                        .find(|h| h.field.to_string().eq_ignore_ascii_case(name))
                        .map(|h| h.value.to_string())
                };
                let url = request.url().to_owned();
                recorded.lock().expect("lock requests").push(RecordedRequest {
                    url: url.clone(),
                    user_agent: header("User-Agent"),
                    accept_language: header("Accept-Language"),
                });

                let id = url
                    .split_once("?projet=")
                    .filter(|(path, _)| *path == MANUSCRIPT_PATH)
                    .and_then(|(_, id)| id.parse::<u64>().ok());

                let response = match id {
                    Some(id) if broken.contains(&id) => {
                        tiny_http::Response::from_string("internal error").with_status_code(500)
                    }
                    Some(id) => match pages.get(&id) {
                        Some(html) => {
                            let content_type = tiny_http::Header::from_bytes(
                                &b"Content-Type"[..],
                                &b"text/html"[..],
                            )
                            .expect("build header");
                            tiny_http::Response::from_string(html.clone())
                                .with_status_code(200)
                                .with_header(content_type)
                        }
                        None => tiny_http::Response::from_string("not found").with_status_code(404),
                    },
                    None => tiny_http::Response::from_string("bad request").with_status_code(400),
                };

                let _ = request.respond(response);
            }
        });

        Self {
            base_url,
            requests,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    #[allow(dead_code)]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("lock requests").clone()
    }
}

impl Drop for CatalogStub {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// A manuscript page shaped like the catalog's detail pages.
#[allow(dead_code)]
pub fn manuscript_page(shelfmark: &str, works: &[(u64, &str)]) -> String {
    let entries = works
        .iter()
        .map(|(id, title)| {
            format!(
                r#"<div class="temoin">
      <p><a href="../../consulter/oeuvre/detail_oeuvre.php?oeuvre={id}">{title}</a></p>
      <table><tr><td>Folios</td><td>f. {id}r-{id}v</td></tr></table>
    </div>"#
            )
        })
        .collect::<Vec<_>>()
        .join("\n    ");

    format!(
        r#"<!doctype html>
<html>
  <head><meta charset="utf-8"><title>Jonas</title></head>
  <body>
    <h1>{shelfmark}</h1>
    <table>
      <tr><td>Datation détaillée</td><td>13e s. (entre 1230 et 1250)</td></tr>
      <tr><td>Type support</td><td>parchemin</td></tr>
    </table>
    {entries}
  </body>
</html>
"#
    )
}
