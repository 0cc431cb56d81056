//! Presenter seam: where flow outcomes surface to the user. The controller
//! never reaches into ambient UI state; whoever owns the screen injects this.

pub trait Presenter: Send + Sync {
    /// Replace the warning/confirmation text. An empty string clears it.
    fn show_message(&self, text: &str);

    /// Send the user back to the login screen.
    fn navigate_to_login(&self);
}
