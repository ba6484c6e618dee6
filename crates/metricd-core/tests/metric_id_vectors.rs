//! Metric identifier vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use metricd_core::metric::MetricId;


#[test]
fn metric_id_vectors() {
    let vectors = vector_loader::load("metric_ids.json");
    assert!(!vectors.is_empty());

    for tv in vectors {
        let got = MetricId::parse(&tv.input);
        match (&tv.expect, &tv.expect_error) {
            (Some(want), None) => {
                let id = got.unwrap_or_else(|e| panic!("{}: unexpected error {e}", tv.description));
                assert_eq!(id.kind, want.kind, "{}", tv.description);
                assert_eq!(id.name, want.name, "{}", tv.description);
                assert_eq!(id.value, want.value, "{}", tv.description);
            }
            (None, Some(err)) => {
                let e = got.expect_err(&tv.description);
                assert_eq!(e.client_code().as_str(), err.code, "{}", tv.description);
                assert_eq!(e.to_string(), "wrong metric format", "{}", tv.description);
            }
            _ => panic!("{}: vector must set exactly one of expect/expect_error", tv.description),
        }
    }
}

#[test]
fn parsed_id_borrows_from_input() {
    let raw = String::from("/update/counter/PollCount/-42");
    let id = MetricId::parse(&raw).unwrap();
    assert_eq!(id.kind, "counter");
    assert_eq!(id.value.parse::<i64>().unwrap(), -42);
}
