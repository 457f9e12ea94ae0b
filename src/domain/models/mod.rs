pub mod culture;
pub mod level;
pub mod message;
pub mod properties;
pub mod setting;
pub mod template;

pub use culture::Culture;
pub use level::Level;
pub use message::{CallbackMessage, LogMessage, MessageCallback, MessageFormatter, TemplateMessage};
pub use properties::{coalesce, Properties};
pub use setting::{FactoryAdapterConfiguration, LogConfiguration, LogSetting};
pub use template::{format_template, Arg};
