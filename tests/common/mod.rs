#![allow(dead_code)]

use axum::{http::StatusCode, routing::get, Router};
use encoding_rs::WINDOWS_1252;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Duration;

pub const HEADER: &str = "Datum;Mitte;Friedrichshain-Kreuzberg;Pankow;Charlottenburg-Wilmersdorf;Spandau;Steglitz-Zehlendorf;Tempelhof-Schöneberg;Neukölln;Treptow-Köpenick;Marzahn-Hellersdorf;Lichtenberg;Reinickendorf";

/// Number of days served by `/cases.csv`.
pub const SAMPLE_DAYS: u64 = 20;

/// Count for the district in header column `column` (0-based, after the
/// date) on day `day` of the sample table.
pub fn sample_count(day: u64, column: u64) -> u64 {
    day + column
}

/// A Windows-1252 encoded table starting 01.09.2020.
pub fn sample_csv(days: u64) -> Vec<u8> {
    let start = chrono::NaiveDate::from_ymd_opt(2020, 9, 1).unwrap();
    let mut text = String::from(HEADER);
    for day in 0..days {
        let date = start + chrono::Duration::days(day as i64);
        text.push('\n');
        text.push_str(&date.format("%d.%m.%Y").to_string());
        for column in 0..12 {
            text.push_str(&format!(";{}", sample_count(day, column)));
        }
    }
    text.push('\n');
    let (bytes, _, _) = WINDOWS_1252.encode(&text);
    bytes.into_owned()
}

fn broken_csv() -> Vec<u8> {
    let header = HEADER.trim_end_matches(";Reinickendorf");
    format!("{header}\n01.09.2020;1;2;3;4;5;6;7;8;9;10;11\n").into_bytes()
}

/// A local stand-in for the published CSV endpoint.
pub struct Upstream {
    pub base_url: String,
    /// Requests served by `/cases.csv`.
    pub hits: Arc<AtomicUsize>,
}

impl Upstream {
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

fn upstream_router(hits: Arc<AtomicUsize>) -> Router {
    let flaky = Arc::new(AtomicUsize::new(0));
    Router::new()
        .route(
            "/cases.csv",
            get(move || {
                let hits = Arc::clone(&hits);
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    sample_csv(SAMPLE_DAYS)
                }
            }),
        )
        .route("/missing.csv", get(|| async { StatusCode::NOT_FOUND }))
        .route("/no-content.csv", get(|| async { StatusCode::NO_CONTENT }))
        .route(
            "/non-authoritative.csv",
            get(|| async {
                (
                    StatusCode::NON_AUTHORITATIVE_INFORMATION,
                    sample_csv(SAMPLE_DAYS),
                )
            }),
        )
        .route("/broken.csv", get(|| async { broken_csv() }))
        .route(
            "/slow.csv",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                sample_csv(SAMPLE_DAYS)
            }),
        )
        .route(
            "/flaky.csv",
            get(move || {
                let flaky = Arc::clone(&flaky);
                async move {
                    if flaky.fetch_add(1, Ordering::SeqCst) == 0 {
                        (StatusCode::SERVICE_UNAVAILABLE, Vec::new())
                    } else {
                        (StatusCode::OK, sample_csv(SAMPLE_DAYS))
                    }
                }
            }),
        )
}

/// Serves the stub on its own thread so it outlives any single test runtime.
pub fn start_upstream() -> Upstream {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = upstream_router(Arc::clone(&hits));
    let (tx, rx) = mpsc::channel::<SocketAddr>();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("upstream runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind upstream");
            tx.send(listener.local_addr().expect("upstream addr"))
                .expect("report upstream addr");
            axum::serve(listener, app).await.expect("upstream server");
        });
    });

    let addr = rx.recv().expect("upstream did not start");
    Upstream {
        base_url: format!("http://{addr}"),
        hits,
    }
}

/// An address nothing is listening on.
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/cases.csv")
}
