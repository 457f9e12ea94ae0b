use std::error::Error;
use std::fmt::Display;

use crate::domain::models::{Arg, CallbackMessage, Culture, Level, LogMessage, MessageFormatter, TemplateMessage};

/// Error payload attached to a log entry.
pub type ErrorRef<'a> = &'a (dyn Error + 'static);

/// Port trait every logger adapter implements.
///
/// A sink implements exactly two things: the level gate ([`is_enabled`](Self::is_enabled))
/// and the write primitive ([`write`](Self::write)). Every leveled convenience method
/// lives in [`LoggerExt`] and funnels into `write` only after the gate has passed, so
/// `write` never sees a disabled level.
///
/// # Hexagonal Architecture
///
/// - This trait is a **port** defined in the domain layer
/// - Console, tracing, capturing and no-op loggers are **adapters**
/// - Application code holds `Arc<dyn Logger>` and never names a concrete sink
///
/// # Examples
///
/// ```
/// use logbridge::{ErrorRef, Level, LogMessage, Logger, LoggerExt};
///
/// struct Stdout;
///
/// impl Logger for Stdout {
///     fn name(&self) -> &str {
///         "stdout"
///     }
///
///     fn is_enabled(&self, level: Level) -> bool {
///         level >= Level::Info
///     }
///
///     fn write(&self, level: Level, message: &LogMessage<'_>, _error: Option<ErrorRef<'_>>) {
///         println!("[{level}] {message}");
///     }
/// }
///
/// Stdout.info("started");
/// Stdout.debug_with(|_| unreachable!("debug is disabled"));
/// ```
pub trait Logger: Send + Sync {
    /// Key this logger was created for.
    fn name(&self) -> &str;

    /// Whether entries at `level` are currently written.
    fn is_enabled(&self, level: Level) -> bool;

    /// Write one entry. Called only for enabled, non-sentinel levels.
    ///
    /// The sink decides whether and how to render `message`; sinks bridging to a second
    /// levelling system should re-check that system's gate before rendering.
    fn write(&self, level: Level, message: &LogMessage<'_>, error: Option<ErrorRef<'_>>);

    /// Entry point used once the level gate has passed.
    ///
    /// Loggers that can perform their own gate and write in one step may override this;
    /// the observable behavior must stay that of `write`.
    fn dispatch(&self, level: Level, message: &LogMessage<'_>, error: Option<ErrorRef<'_>>) {
        self.write(level, message, error);
    }

    fn is_trace_enabled(&self) -> bool {
        self.is_enabled(Level::Trace)
    }

    fn is_debug_enabled(&self) -> bool {
        self.is_enabled(Level::Debug)
    }

    fn is_info_enabled(&self) -> bool {
        self.is_enabled(Level::Info)
    }

    fn is_warn_enabled(&self) -> bool {
        self.is_enabled(Level::Warn)
    }

    fn is_error_enabled(&self) -> bool {
        self.is_enabled(Level::Error)
    }

    fn is_fatal_enabled(&self) -> bool {
        self.is_enabled(Level::Fatal)
    }
}

macro_rules! level_methods {
    ($(
        $level:ident => $plain:ident, $plain_err:ident,
            $format:ident, $format_err:ident, $format_in:ident, $format_in_err:ident,
            $with:ident, $with_err:ident, $with_in:ident, $with_in_err:ident;
    )*) => {$(
        #[doc = concat!("Write `message` at [`Level::", stringify!($level), "`].")]
        fn $plain(&self, message: impl Display) {
            self.log_value(Level::$level, &message, None);
        }

        #[doc = concat!("Write `message` and `error` at [`Level::", stringify!($level), "`].")]
        fn $plain_err(&self, message: impl Display, error: ErrorRef<'_>) {
            self.log_value(Level::$level, &message, Some(error));
        }

        #[doc = concat!("Write a composite template at [`Level::", stringify!($level), "`].")]
        fn $format(&self, template: &str, args: &[Arg<'_>]) {
            self.log_format(Level::$level, None, template, args, None);
        }

        fn $format_err(&self, template: &str, error: ErrorRef<'_>, args: &[Arg<'_>]) {
            self.log_format(Level::$level, None, template, args, Some(error));
        }

        fn $format_in(&self, culture: &Culture, template: &str, args: &[Arg<'_>]) {
            self.log_format(Level::$level, Some(culture), template, args, None);
        }

        fn $format_in_err(&self, culture: &Culture, template: &str, error: ErrorRef<'_>, args: &[Arg<'_>]) {
            self.log_format(Level::$level, Some(culture), template, args, Some(error));
        }

        #[doc = concat!("Write a lazily built message at [`Level::", stringify!($level), "`].")]
        ///
        /// The callback is not invoked when the level is disabled.
        fn $with(&self, callback: impl Fn(&MessageFormatter<'_>) -> String + Sync) {
            self.log_with(Level::$level, None, &callback, None);
        }

        fn $with_err(&self, callback: impl Fn(&MessageFormatter<'_>) -> String + Sync, error: ErrorRef<'_>) {
            self.log_with(Level::$level, None, &callback, Some(error));
        }

        fn $with_in(&self, culture: &Culture, callback: impl Fn(&MessageFormatter<'_>) -> String + Sync) {
            self.log_with(Level::$level, Some(culture), &callback, None);
        }

        fn $with_in_err(
            &self,
            culture: &Culture,
            callback: impl Fn(&MessageFormatter<'_>) -> String + Sync,
            error: ErrorRef<'_>,
        ) {
            self.log_with(Level::$level, Some(culture), &callback, Some(error));
        }
    )*};
}

/// Leveled write methods available on every [`Logger`], including `dyn Logger`.
///
/// All shapes reduce to three gated funnels. Nothing passed to a disabled call is
/// formatted: raw values are not displayed, templates are not interpolated and
/// callbacks are not invoked. Template arguments are still evaluated by the caller, so
/// prefer the `*_with` callbacks when computing an argument is itself expensive.
pub trait LoggerExt: Logger {
    /// Gate, then pass `message` through unformatted.
    fn log_value(&self, level: Level, message: &dyn Display, error: Option<ErrorRef<'_>>) {
        if level.is_sentinel() || !self.is_enabled(level) {
            return;
        }
        self.dispatch(level, &LogMessage::Value(message), error);
    }

    /// Gate, then hand over a deferred template message.
    fn log_format(
        &self,
        level: Level,
        culture: Option<&Culture>,
        template: &str,
        args: &[Arg<'_>],
        error: Option<ErrorRef<'_>>,
    ) {
        if level.is_sentinel() || !self.is_enabled(level) {
            return;
        }
        let message = LogMessage::Template(TemplateMessage::new(culture, template, args));
        self.dispatch(level, &message, error);
    }

    /// Gate, then hand over a deferred callback message.
    fn log_with(
        &self,
        level: Level,
        culture: Option<&Culture>,
        callback: &(dyn Fn(&MessageFormatter<'_>) -> String + Sync),
        error: Option<ErrorRef<'_>>,
    ) {
        if level.is_sentinel() || !self.is_enabled(level) {
            return;
        }
        let message = LogMessage::Callback(CallbackMessage::new(culture, callback));
        self.dispatch(level, &message, error);
    }

    /// Write `message` at `level`.
    fn log(&self, level: Level, message: impl Display) {
        self.log_value(level, &message, None);
    }

    level_methods! {
        Trace => trace, trace_err,
            trace_format, trace_format_err, trace_format_in, trace_format_in_err,
            trace_with, trace_with_err, trace_with_in, trace_with_in_err;
        Debug => debug, debug_err,
            debug_format, debug_format_err, debug_format_in, debug_format_in_err,
            debug_with, debug_with_err, debug_with_in, debug_with_in_err;
        Info => info, info_err,
            info_format, info_format_err, info_format_in, info_format_in_err,
            info_with, info_with_err, info_with_in, info_with_in_err;
        Warn => warn, warn_err,
            warn_format, warn_format_err, warn_format_in, warn_format_in_err,
            warn_with, warn_with_err, warn_with_in, warn_with_in_err;
        Error => error, error_err,
            error_format, error_format_err, error_format_in, error_format_in_err,
            error_with, error_with_err, error_with_in, error_with_in_err;
        Fatal => fatal, fatal_err,
            fatal_format, fatal_format_err, fatal_format_in, fatal_format_in_err,
            fatal_with, fatal_with_err, fatal_with_in, fatal_with_in_err;
    }
}

impl<L: Logger + ?Sized> LoggerExt for L {}
