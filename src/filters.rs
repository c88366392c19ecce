//! Request and response filters
//!
//! Filters run in registration order. Each consumes a value and returns the
//! (possibly rewritten) value passed to the next one. Closures with the right
//! signature are filters:
//!
//! ```rust
//! use agent_dispatch::filters::RequestFilter;
//! use agent_dispatch::protocol::Request;
//!
//! let shout = |request: Request| {
//!     let text = request.text.to_uppercase();
//!     request.with_text(text)
//! };
//! assert_eq!(shout.filter(Request::new("hi")).text, "HI");
//! ```

use crate::protocol::{Request, Response};

/// Rewrites a request before routing
pub trait RequestFilter: Send + Sync {
    fn filter(&self, request: Request) -> Request;
}

/// Rewrites a response before it is returned
pub trait ResponseFilter: Send + Sync {
    fn filter(&self, response: Response) -> Response;
}

impl<F> RequestFilter for F
where
    F: Fn(Request) -> Request + Send + Sync,
{
    fn filter(&self, request: Request) -> Request {
        self(request)
    }
}

impl<F> ResponseFilter for F
where
    F: Fn(Response) -> Response + Send + Sync,
{
    fn filter(&self, response: Response) -> Response {
        self(response)
    }
}

/// Run `request` through every filter in order
pub fn apply_request_filters(filters: &[Box<dyn RequestFilter>], request: Request) -> Request {
    filters
        .iter()
        .fold(request, |request, filter| filter.filter(request))
}

/// Run `response` through every filter in order
pub fn apply_response_filters(filters: &[Box<dyn ResponseFilter>], response: Response) -> Response {
    filters
        .iter()
        .fold(response, |response, filter| filter.filter(response))
}
