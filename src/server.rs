//! Dashboard HTTP server.
//!
//! Minimal HTTP/1.1 over a tokio listener: read the request line, drain the
//! headers, dispatch on the path, write one response, close. Every route
//! catches its own failures so a broken backend degrades a single page
//! region instead of the process.

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use serde_json::json;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

use crate::backend::Backend;
use crate::cycle::run_cycle_report;
use crate::logging::{json_log, log, obj, ts_now, v_str, Domain, Level};
use crate::map::LiveFactoryMap;
use crate::mission::{load_mission, MissionState};
use crate::pages;
use crate::state::Config;

#[derive(Clone)]
pub struct Dashboard {
    pub cfg: Config,
    pub backend: Arc<dyn Backend>,
    pub map: Arc<Mutex<LiveFactoryMap>>,
}

struct Response {
    status: &'static str,
    content_type: &'static str,
    body: String,
}

impl Response {
    fn html(body: String) -> Self {
        Self { status: "200 OK", content_type: "text/html; charset=utf-8", body }
    }

    fn not_found() -> Self {
        Self { status: "404 NOT FOUND", content_type: "text/plain", body: "Not Found".to_string() }
    }

    fn encode(&self) -> String {
        format!(
            "HTTP/1.1 {}\r\n\
             Content-Type: {}\r\n\
             Access-Control-Allow-Origin: *\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\r\n{}",
            self.status,
            self.content_type,
            self.body.len(),
            self.body,
        )
    }
}

pub async fn serve(dash: Dashboard) -> Result<()> {
    let listener = TcpListener::bind(&dash.cfg.listen_addr).await?;
    json_log(Domain::Server, "listening", obj(&[("addr", v_str(&dash.cfg.listen_addr))]));
    loop {
        let (stream, _) = match listener.accept().await {
            Ok(conn) => conn,
            Err(err) => {
                log(Level::Warn, Domain::Server, "accept_failed", obj(&[("error", v_str(&err.to_string()))]));
                continue;
            }
        };
        let dash = dash.clone();
        tokio::spawn(async move {
            if let Err(err) = handle_connection(stream, dash).await {
                log(Level::Debug, Domain::Server, "connection_error", obj(&[("error", v_str(&err.to_string()))]));
            }
        });
    }
}

async fn handle_connection(stream: TcpStream, dash: Dashboard) -> Result<()> {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).await?;

    // Drain headers; nothing in them changes how we answer.
    loop {
        let mut line = String::new();
        let n = reader.read_line(&mut line).await?;
        if n == 0 || line == "\r\n" || line == "\n" {
            break;
        }
    }

    let response = match parse_request_line(&request_line) {
        Some(("GET", target)) => respond(&dash, target).await,
        Some(_) => Response {
            status: "405 METHOD NOT ALLOWED",
            content_type: "text/plain",
            body: "Method Not Allowed".to_string(),
        },
        None => Response {
            status: "400 BAD REQUEST",
            content_type: "text/plain",
            body: "Bad Request".to_string(),
        },
    };

    let mut stream = reader.into_inner();
    stream.write_all(response.encode().as_bytes()).await?;
    stream.shutdown().await?;
    Ok(())
}

async fn respond(dash: &Dashboard, target: &str) -> Response {
    let (path, query) = split_target(target);
    match path {
        "/" => {
            let (svg, descriptions) = map_snapshot(dash);
            Response::html(pages::home_page(&svg, &descriptions))
        }
        "/factory" => {
            let (svg, descriptions) = map_snapshot(dash);
            Response::html(pages::factory_page(&svg, &descriptions))
        }
        "/factory/map.svg" => {
            let (svg, _) = map_snapshot(dash);
            Response { status: "200 OK", content_type: "image/svg+xml", body: svg }
        }
        "/missions" => {
            let state = match query_param(query, "mission") {
                None => MissionState::Unselected,
                Some(name) => load_mission(Path::new(&dash.cfg.text_dir), &name).await,
            };
            Response::html(pages::mission_page(&state))
        }
        "/simulate" => {
            let scenario = query_param(query, "scenario");
            Response::html(pages::simulate_page(scenario.as_deref()))
        }
        "/run-cycle" => {
            match run_cycle_report(dash.backend.as_ref(), &dash.cfg.machine_filter).await {
                Ok(report) => Response::html(pages::cycle_page(&report)),
                Err(err) => {
                    log(
                        Level::Warn,
                        Domain::Cycle,
                        "run_cycle_failed",
                        obj(&[("error", v_str(&err.to_string()))]),
                    );
                    Response::html(pages::error_page(
                        "Run Cycle",
                        "Failed to run a factory cycle. Is the simulator up?",
                    ))
                }
            }
        }
        "/api/state" => {
            let snapshot = {
                let map = dash.map.lock().expect("map lock poisoned");
                json!({
                    "ts": ts_now(),
                    "cycle_id": map.last_cycle_id(),
                    "anomaly_count": map.scene().glyphs.len(),
                    "descriptions": map.descriptions(),
                })
            };
            Response {
                status: "200 OK",
                content_type: "application/json",
                body: snapshot.to_string(),
            }
        }
        other => {
            if let Some(file) = other.strip_prefix("/text_files/") {
                return serve_text_file(dash, file).await;
            }
            Response::not_found()
        }
    }
}

fn map_snapshot(dash: &Dashboard) -> (String, Vec<String>) {
    let map = dash.map.lock().expect("map lock poisoned");
    (map.svg(), map.descriptions().to_vec())
}

async fn serve_text_file(dash: &Dashboard, file: &str) -> Response {
    let Some(name) = sanitize_filename(file) else {
        return Response::not_found();
    };
    let path = Path::new(&dash.cfg.text_dir).join(name);
    match tokio::fs::read_to_string(&path).await {
        Ok(body) => Response { status: "200 OK", content_type: "text/plain; charset=utf-8", body },
        Err(_) => Response::not_found(),
    }
}

/// Only bare `*.txt` names are served from the briefing directory.
fn sanitize_filename(file: &str) -> Option<&str> {
    if file.is_empty() || file.contains('/') || file.contains("..") || !file.ends_with(".txt") {
        return None;
    }
    Some(file)
}

fn parse_request_line(line: &str) -> Option<(&str, &str)> {
    let mut parts = line.split_whitespace();
    let method = parts.next()?;
    let target = parts.next()?;
    Some((method, target))
}

fn split_target(target: &str) -> (&str, &str) {
    match target.split_once('?') {
        Some((path, query)) => (path, query),
        None => (target, ""),
    }
}

fn query_param(query: &str, key: &str) -> Option<String> {
    for pair in query.split('&') {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        if k == key {
            return Some(url_decode(v));
        }
    }
    None
}

fn url_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
                match hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                    Some(byte) => {
                        out.push(byte);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}
