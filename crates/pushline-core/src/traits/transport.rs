//! Transport trait for the hosted pub/sub connection.

/// Outbound primitives of the realtime connection.
///
/// Every call is a one-way request: nothing is returned and failures are
/// reported later through lifecycle notifications.
pub trait Transport: Send + Sync + std::fmt::Debug + 'static {
    /// Open the connection with an opaque credential.
    fn connect(&self, credential: &str);

    /// Ask the remote service to start delivering a channel.
    fn subscribe(&self, channel: &str);

    /// Ask the remote service to stop delivering a channel.
    fn unsubscribe(&self, channel: &str);

    /// Tell the remote side this channel cares about an event name.
    fn bind(&self, channel: &str, event: &str);

    /// Withdraw interest in an event name on a channel.
    fn unbind(&self, channel: &str, event: &str);
}
