//! Global state management

use dioxus::prelude::*;
use merchant_core::Notice;

/// How long a toast stays up
pub const TOAST_MILLIS: u32 = 4_000;

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub notice: Notice,
}

/// Transient notifications shown by the toast host
#[derive(Clone, Copy)]
pub struct ToastState {
    pub toasts: Signal<Vec<Toast>>,
    next_id: Signal<u64>,
}

impl ToastState {
    pub fn new() -> Self {
        Self {
            toasts: Signal::new(Vec::new()),
            next_id: Signal::new(0),
        }
    }

    pub fn show(&self, notice: Notice) {
        let mut next_id = self.next_id;
        let id = *next_id.peek();
        next_id.set(id + 1);

        let mut toasts = self.toasts;
        toasts.write().push(Toast { id, notice });

        #[cfg(feature = "web")]
        spawn(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_MILLIS).await;
            toasts.write().retain(|t| t.id != id);
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(Notice::success(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(Notice::error(message));
    }

    pub fn dismiss(&self, id: u64) {
        let mut toasts = self.toasts;
        toasts.write().retain(|t| t.id != id);
    }
}

/// Hook to access the toast state
pub fn use_toasts() -> ToastState {
    use_context::<ToastState>()
}

/// Interface language offered in settings
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Pidgin,
    Yoruba,
    Igbo,
    Hausa,
}

impl Language {
    pub fn label(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Pidgin => "Pidgin",
            Language::Yoruba => "Yoruba",
            Language::Igbo => "Igbo",
            Language::Hausa => "Hausa",
        }
    }

    pub fn variants() -> &'static [Language] {
        &[
            Language::English,
            Language::Pidgin,
            Language::Yoruba,
            Language::Igbo,
            Language::Hausa,
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationChannel {
    WhatsApp,
    Push,
    Sms,
    Email,
}

impl NotificationChannel {
    pub fn label(&self) -> &'static str {
        match self {
            NotificationChannel::WhatsApp => "WhatsApp Receipts",
            NotificationChannel::Push => "Push Notifications",
            NotificationChannel::Sms => "SMS Alerts",
            NotificationChannel::Email => "Email Summaries",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            NotificationChannel::WhatsApp => "Send copies of receipts directly via WhatsApp.",
            NotificationChannel::Push => "Alerts for incoming payments in real-time.",
            NotificationChannel::Sms => "Text message for every settled payment.",
            NotificationChannel::Email => "Daily settlement report to your inbox.",
        }
    }

    pub fn variants() -> &'static [NotificationChannel] {
        &[
            NotificationChannel::WhatsApp,
            NotificationChannel::Push,
            NotificationChannel::Sms,
            NotificationChannel::Email,
        ]
    }
}

/// Local-only preferences on the settings page
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Preferences {
    pub whatsapp: bool,
    pub sms: bool,
    pub email: bool,
    pub push: bool,
    pub language: Language,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            whatsapp: true,
            sms: false,
            email: true,
            push: true,
            language: Language::English,
        }
    }
}

impl Preferences {
    pub fn enabled(&self, channel: NotificationChannel) -> bool {
        match channel {
            NotificationChannel::WhatsApp => self.whatsapp,
            NotificationChannel::Push => self.push,
            NotificationChannel::Sms => self.sms,
            NotificationChannel::Email => self.email,
        }
    }

    pub fn toggle(&mut self, channel: NotificationChannel) {
        let flag = match channel {
            NotificationChannel::WhatsApp => &mut self.whatsapp,
            NotificationChannel::Push => &mut self.push,
            NotificationChannel::Sms => &mut self.sms,
            NotificationChannel::Email => &mut self.email,
        };
        *flag = !*flag;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_flips_only_that_channel() {
        let mut prefs = Preferences::default();
        prefs.toggle(NotificationChannel::Sms);

        assert!(prefs.enabled(NotificationChannel::Sms));
        assert!(prefs.enabled(NotificationChannel::WhatsApp));
        assert!(prefs.enabled(NotificationChannel::Email));

        prefs.toggle(NotificationChannel::Sms);
        assert_eq!(prefs, Preferences::default());
    }
}
