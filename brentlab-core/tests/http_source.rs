//! HttpSource against a throwaway local HTTP server.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use brentlab_core::data::{fetch_snapshot, DashboardSource, DataError, HttpSource};
use chrono::NaiveDate;

struct Route {
    path: &'static str,
    status: u16,
    body: &'static str,
}

/// Serve fixed responses on an ephemeral port; returns the base URL.
fn serve(routes: Vec<Route>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { break };
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request_line = String::new();
            if reader.read_line(&mut request_line).unwrap_or(0) == 0 {
                continue;
            }
            loop {
                let mut header = String::new();
                let n = reader.read_line(&mut header).unwrap_or(0);
                if n == 0 || header == "\r\n" {
                    break;
                }
            }

            let path = request_line.split_whitespace().nth(1).unwrap_or("/").to_string();
            let (status, body) = routes
                .iter()
                .find(|r| r.path == path)
                .map(|r| (r.status, r.body))
                .unwrap_or((404, ""));
            let reason = match status {
                200 => "OK",
                404 => "Not Found",
                _ => "Internal Server Error",
            };
            let response = format!(
                "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        }
    });

    format!("http://{addr}")
}

const PRICES: &str = r#"[
    {"Date": "Wed, 01 Jan 2020 00:00:00 GMT", "Price": 67.05},
    {"Date": "Thu, 02 Jan 2020 00:00:00 GMT", "Price": 66.25},
    {"Date": "Fri, 03 Jan 2020 00:00:00 GMT", "Price": 69.08}
]"#;

const CHANGE_POINTS: &str = r#"[
    {"change_point": "2020-01-03", "event_date": "2020-01-03", "event_description": "Soleimani strike"}
]"#;

const EVENTS: &str = r#"[
    {"date": "Fri, 03 Jan 2020 00:00:00 GMT", "description": "Soleimani strike"}
]"#;

fn source(base_url: &str) -> HttpSource {
    HttpSource::new(base_url, Duration::from_secs(5)).unwrap()
}

#[test]
fn fetches_and_decodes_all_three_endpoints() {
    let base = serve(vec![
        Route { path: "/api/prices", status: 200, body: PRICES },
        Route { path: "/api/change-points", status: 200, body: CHANGE_POINTS },
        Route { path: "/api/events", status: 200, body: EVENTS },
    ]);

    let snapshot = fetch_snapshot(&source(&base)).unwrap();
    let jan3 = NaiveDate::from_ymd_opt(2020, 1, 3).unwrap();

    assert_eq!(snapshot.prices.len(), 3);
    assert_eq!(snapshot.prices[2].date, jan3);
    assert_eq!(snapshot.change_points[0].change_point, jan3);
    assert_eq!(snapshot.events[0].description, "Soleimani strike");
}

#[test]
fn server_error_is_http_status() {
    let base = serve(vec![Route { path: "/api/events", status: 500, body: "{}" }]);
    let err = source(&base).fetch_events().unwrap_err();
    match err {
        DataError::HttpStatus { status, url } => {
            assert_eq!(status, 500);
            assert!(url.ends_with("/api/events"));
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[test]
fn malformed_body_is_response_format() {
    let base = serve(vec![Route { path: "/api/prices", status: 200, body: "<html>oops</html>" }]);
    let err = source(&base).fetch_prices().unwrap_err();
    assert!(matches!(err, DataError::ResponseFormat(_)));
}

#[test]
fn one_missing_endpoint_fails_the_snapshot() {
    let base = serve(vec![
        Route { path: "/api/prices", status: 200, body: PRICES },
        Route { path: "/api/events", status: 200, body: EVENTS },
    ]);
    let err = fetch_snapshot(&source(&base)).unwrap_err();
    assert!(matches!(err, DataError::HttpStatus { status: 404, .. }));
}

#[test]
fn refused_connection_is_network_unreachable() {
    // Bind then drop to get a port nobody is listening on.
    let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    let err = source(&format!("http://127.0.0.1:{port}")).fetch_prices().unwrap_err();
    assert!(matches!(err, DataError::NetworkUnreachable(_)));
}
