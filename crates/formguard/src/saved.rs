//! Where challenged requests are remembered until the user logs in.

use formguard_http::{HttpError, SavedRequest, SecurityRequest};

/// The session attribute [`SessionRequestStore`] uses.
pub const SAVED_REQUEST_ATTRIBUTE: &str = "formguard.saved_request";

/// Saves a challenged request and hands back its URL after login.
///
/// [`FormAuthenticator::show_login`](crate::FormAuthenticator::show_login)
/// calls [`save`](Self::save) before redirecting to the login page; a
/// successful login submission calls
/// [`continue_to_url`](Self::continue_to_url) to find out where to go next.
pub trait SavedRequestStore: Send + Sync + 'static {
    /// Remembers `request` so the user can continue to it after login.
    fn save<P>(&self, request: &mut SecurityRequest<P>) -> Result<(), HttpError>;

    /// Returns the URL of the saved request, if there is one.
    fn continue_to_url<P>(
        &self,
        request: &SecurityRequest<P>,
    ) -> Result<Option<String>, HttpError>;
}

/// Keeps the saved request as JSON in a session attribute.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionRequestStore;

impl SessionRequestStore {
    /// Reads back the whole saved request, for filters that replay it.
    pub fn saved_request<P>(
        &self,
        request: &SecurityRequest<P>,
    ) -> Result<Option<SavedRequest>, HttpError> {
        request
            .session()
            .and_then(|session| session.attribute(SAVED_REQUEST_ATTRIBUTE))
            .map(SavedRequest::from_json)
            .transpose()
    }
}

impl SavedRequestStore for SessionRequestStore {
    fn save<P>(&self, request: &mut SecurityRequest<P>) -> Result<(), HttpError> {
        let saved = SavedRequest::capture(request);
        let json = saved.to_json()?;
        request
            .session_mut()
            .set_attribute(SAVED_REQUEST_ATTRIBUTE, json);
        tracing::debug!(url = %saved.url, method = %saved.method, "request saved");
        Ok(())
    }

    fn continue_to_url<P>(
        &self,
        request: &SecurityRequest<P>,
    ) -> Result<Option<String>, HttpError> {
        Ok(self.saved_request(request)?.map(|saved| saved.url))
    }
}
