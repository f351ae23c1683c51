//! Platform detection.
//!
//! The auto-connect policy only applies on handheld form factors, which are
//! detected from the user-agent string. Coarse on purpose: a false negative
//! just means the user taps the connect button themselves.

/// Whether a user-agent string belongs to a handheld device.
pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    ["android", "iphone", "ipad", "ipod", "mobile"]
        .iter()
        .any(|marker| ua.contains(marker))
}

/// Read the browser's user agent and classify the platform.
pub fn is_mobile_platform() -> bool {
    web_sys::window()
        .and_then(|w| w.navigator().user_agent().ok())
        .map(|ua| is_mobile_user_agent(&ua))
        .unwrap_or(false)
}
