//! The search pass: filters + location in, report + places out.
//!
//! Deliberately thin. Location is validated, the prompt is built, the
//! provider is asked exactly once, and whatever comes back is shaped
//! for display. No retry, no caching; an empty citation list is an
//! empty state for the view, not a failure.

use crate::client::{GroundedRequest, PlacesClient};
use crate::error::{CompassError, Result};
use crate::model::{LocationContext, Place, SearchFilters};
use crate::prompt;

/// Shown when the provider answers with no report text at all.
const EMPTY_REPORT_FALLBACK: &str = "嗚嗚... 找不到相關結果，換個條件試試看？";

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub report: String,
    pub places: Vec<Place>,
}

pub fn run<C: PlacesClient>(
    client: &C,
    filters: &SearchFilters,
    location: &LocationContext,
) -> Result<SearchOutcome> {
    if let LocationContext::Manual(address) = location {
        if address.trim().is_empty() {
            return Err(CompassError::MissingManualAddress);
        }
    }

    let request = GroundedRequest {
        prompt: prompt::build(filters, location),
        bias: match location {
            LocationContext::Device(coords) => Some(*coords),
            LocationContext::Manual(_) => None,
        },
    };

    let response = client.generate(&request)?;

    let report = if response.text.trim().is_empty() {
        EMPTY_REPORT_FALLBACK.to_string()
    } else {
        response.text
    };

    Ok(SearchOutcome {
        report,
        places: response.citations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::GroundedResponse;
    use crate::model::Coordinates;
    use std::cell::RefCell;

    struct StubClient {
        response: Result<GroundedResponse>,
        seen: RefCell<Vec<GroundedRequest>>,
    }

    impl StubClient {
        fn answering(text: &str, citations: Vec<Place>) -> Self {
            Self {
                response: Ok(GroundedResponse {
                    text: text.to_string(),
                    citations,
                }),
                seen: RefCell::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                response: Err(CompassError::AiRequestFailed(message.to_string())),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl PlacesClient for StubClient {
        fn generate(&self, request: &GroundedRequest) -> Result<GroundedResponse> {
            self.seen.borrow_mut().push(request.clone());
            match &self.response {
                Ok(response) => Ok(response.clone()),
                Err(CompassError::AiRequestFailed(msg)) => {
                    Err(CompassError::AiRequestFailed(msg.clone()))
                }
                Err(_) => unreachable!(),
            }
        }
    }

    fn device() -> LocationContext {
        LocationContext::Device(Coordinates {
            latitude: 25.0,
            longitude: 121.5,
        })
    }

    #[test]
    fn device_search_biases_the_request() {
        let client = StubClient::answering("報告", vec![Place::new("u", "t")]);
        let outcome = run(&client, &SearchFilters::default(), &device()).unwrap();
        assert_eq!(outcome.report, "報告");
        assert_eq!(outcome.places.len(), 1);

        let seen = client.seen.borrow();
        assert_eq!(seen.len(), 1, "exactly one attempt");
        assert!(seen[0].bias.is_some());
    }

    #[test]
    fn manual_search_sends_no_bias() {
        let client = StubClient::answering("報告", vec![]);
        run(
            &client,
            &SearchFilters::default(),
            &LocationContext::Manual("板橋車站".into()),
        )
        .unwrap();
        assert!(client.seen.borrow()[0].bias.is_none());
    }

    #[test]
    fn blank_manual_address_is_rejected_before_the_call() {
        let client = StubClient::answering("報告", vec![]);
        let err = run(
            &client,
            &SearchFilters::default(),
            &LocationContext::Manual("   ".into()),
        )
        .unwrap_err();
        assert!(matches!(err, CompassError::MissingManualAddress));
        assert!(client.seen.borrow().is_empty());
    }

    #[test]
    fn empty_report_text_gets_the_fallback_line() {
        let client = StubClient::answering("  \n ", vec![Place::new("u", "t")]);
        let outcome = run(&client, &SearchFilters::default(), &device()).unwrap();
        assert_eq!(outcome.report, EMPTY_REPORT_FALLBACK);
        assert_eq!(outcome.places.len(), 1);
    }

    #[test]
    fn zero_citations_is_an_outcome_not_an_error() {
        let client = StubClient::answering("有報告，沒連結", vec![]);
        let outcome = run(&client, &SearchFilters::default(), &device()).unwrap();
        assert!(outcome.places.is_empty());
    }

    #[test]
    fn provider_failure_surfaces_unwrapped() {
        let client = StubClient::failing("provider returned 500");
        let err = run(&client, &SearchFilters::default(), &device()).unwrap_err();
        assert!(matches!(err, CompassError::AiRequestFailed(_)));
    }
}
