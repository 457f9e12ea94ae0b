//! Message representations handed to sinks.
//!
//! A sink receives either the caller's raw value or one of two deferred wrappers. The
//! wrappers render on first use only and keep the rendered text, so a sink that formats
//! the same message twice (for example console output plus an error chain) pays for
//! one formatting pass.

use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

use super::culture::Culture;
use super::template::{format_template_lossy, Arg};

/// Formatting function passed to lazy message callbacks.
///
/// ```
/// use logbridge::{Arg, MessageFormatter};
///
/// let callback = |fmt: &MessageFormatter<'_>| fmt.format("{0} items", &[Arg::from(3)]);
/// # let _ = callback;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MessageFormatter<'c> {
    culture: Option<&'c Culture>,
}

impl<'c> MessageFormatter<'c> {
    pub const fn new(culture: Option<&'c Culture>) -> Self {
        Self { culture }
    }

    pub const fn culture(&self) -> Option<&'c Culture> {
        self.culture
    }

    /// Render a composite template.
    ///
    /// Without arguments and without an explicit culture the template is returned
    /// verbatim, braces included.
    pub fn format(&self, template: &str, args: &[Arg<'_>]) -> String {
        if args.is_empty() && self.culture.is_none() {
            return template.to_string();
        }
        format_template_lossy(self.culture, template, args).into_owned()
    }
}

/// User callback producing a message on demand.
pub type MessageCallback<'a> = &'a (dyn Fn(&MessageFormatter<'_>) -> String + Sync + 'a);

/// Deferred message built from a callback. The callback runs at most once.
pub struct CallbackMessage<'a> {
    culture: Option<&'a Culture>,
    callback: MessageCallback<'a>,
    rendered: OnceLock<String>,
}

impl<'a> CallbackMessage<'a> {
    pub fn new(culture: Option<&'a Culture>, callback: MessageCallback<'a>) -> Self {
        Self {
            culture,
            callback,
            rendered: OnceLock::new(),
        }
    }

    /// The message text, invoking the callback on first call only.
    pub fn render(&self) -> &str {
        self.rendered
            .get_or_init(|| (self.callback)(&MessageFormatter::new(self.culture)))
    }

    pub fn is_rendered(&self) -> bool {
        self.rendered.get().is_some()
    }
}

impl fmt::Debug for CallbackMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackMessage")
            .field("culture", &self.culture)
            .field("rendered", &self.rendered.get())
            .finish_non_exhaustive()
    }
}

/// Deferred message built from a composite template and its arguments.
#[derive(Debug)]
pub struct TemplateMessage<'a> {
    culture: Option<&'a Culture>,
    template: &'a str,
    args: &'a [Arg<'a>],
    rendered: OnceLock<String>,
}

impl<'a> TemplateMessage<'a> {
    pub fn new(culture: Option<&'a Culture>, template: &'a str, args: &'a [Arg<'a>]) -> Self {
        Self {
            culture,
            template,
            args,
            rendered: OnceLock::new(),
        }
    }

    pub const fn template(&self) -> &'a str {
        self.template
    }

    pub const fn args(&self) -> &'a [Arg<'a>] {
        self.args
    }

    /// The interpolated text, computed on first call only.
    pub fn render(&self) -> &str {
        self.rendered.get_or_init(|| {
            format_template_lossy(self.culture, self.template, self.args).into_owned()
        })
    }

    pub fn is_rendered(&self) -> bool {
        self.rendered.get().is_some()
    }
}

/// What a sink's write primitive receives.
pub enum LogMessage<'a> {
    /// The caller's value, passed through unformatted.
    Value(&'a dyn fmt::Display),
    Callback(CallbackMessage<'a>),
    Template(TemplateMessage<'a>),
}

impl LogMessage<'_> {
    /// Final message text.
    ///
    /// Deferred variants borrow their cached rendering; raw values are formatted on
    /// every call.
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            Self::Value(value) => Cow::Owned(value.to_string()),
            Self::Callback(message) => Cow::Borrowed(message.render()),
            Self::Template(message) => Cow::Borrowed(message.render()),
        }
    }
}

impl fmt::Display for LogMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => value.fmt(f),
            Self::Callback(message) => f.write_str(message.render()),
            Self::Template(message) => f.write_str(message.render()),
        }
    }
}

impl fmt::Debug for LogMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(_) => f.write_str("Value(..)"),
            Self::Callback(message) => message.fmt(f),
            Self::Template(message) => message.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_callback_renders_once() {
        let calls = AtomicUsize::new(0);
        let callback = |fmt: &MessageFormatter<'_>| {
            calls.fetch_add(1, Ordering::SeqCst);
            fmt.format("hello {0}", &["world".into()])
        };
        let message = CallbackMessage::new(None, &callback);

        assert!(!message.is_rendered());
        assert_eq!(calls.load(Ordering::SeqCst), 0, "construction must not render");
        assert_eq!(message.render(), "hello world");
        assert_eq!(message.render(), "hello world");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_callback_receives_culture() {
        let german = Culture::de_de();
        let callback = |fmt: &MessageFormatter<'_>| fmt.format("{0}", &[2.5.into()]);
        let message = CallbackMessage::new(Some(&german), &callback);
        assert_eq!(message.render(), "2,5");
    }

    #[test]
    fn test_formatter_without_args_keeps_template_verbatim() {
        let formatter = MessageFormatter::new(None);
        assert_eq!(formatter.format("literal {0} braces", &[]), "literal {0} braces");
    }

    #[test]
    fn test_template_renders_lazily_and_once() {
        let args = [Arg::from(42)];
        let message = TemplateMessage::new(None, "value={0}", &args);
        assert!(!message.is_rendered());
        assert_eq!(message.render(), "value=42");
        assert!(message.is_rendered());
        assert!(std::ptr::eq(message.render(), message.render()));
    }

    #[test]
    fn test_concurrent_render_yields_single_text() {
        let calls = AtomicUsize::new(0);
        let callback = |_: &MessageFormatter<'_>| {
            calls.fetch_add(1, Ordering::SeqCst);
            "shared".to_string()
        };
        let message = CallbackMessage::new(None, &callback);

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| assert_eq!(message.render(), "shared"));
            }
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_log_message_display() {
        let value = 17;
        assert_eq!(LogMessage::Value(&value).to_string(), "17");
        let args = [Arg::from("x")];
        let message = LogMessage::Template(TemplateMessage::new(None, "[{0}]", &args));
        assert_eq!(message.render(), "[x]");
        assert_eq!(message.to_string(), "[x]");
    }
}
