use colored::{ColoredString, Colorize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn tag(&self) -> ColoredString {
        match self {
            LogLevel::Debug => "DBG".bright_cyan(),
            LogLevel::Info => "INF".bright_green(),
            LogLevel::Warn => "WAR".yellow(),
            LogLevel::Error => "ERR".bright_red(),
        }
    }

    /// Whether a message at level `message` is visible when the logger is
    /// configured at level `self`.
    pub fn shows(&self, message: &LogLevel) -> bool {
        match self {
            LogLevel::Debug => true,
            LogLevel::Info => *message != LogLevel::Debug,
            LogLevel::Warn => *message == LogLevel::Warn || *message == LogLevel::Error,
            LogLevel::Error => *message == LogLevel::Error,
        }
    }
}

/// A named logger with a level filter. Messages print to stdout with a
/// colored level tag and the dimmed logger name as prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logger {
    level: LogLevel,
    name: String,
}

impl Logger {
    pub fn new(level: LogLevel, name: String) -> Self {
        Logger { level, name }
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        if self.level.shows(&level) {
            println!("[{}] {} {}", level.tag(), format!("{}:", self.name).dimmed(), message);
        }
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    /// Starts a structured multi-line record.
    pub fn object<'a>(&'a self, name: &'a str) -> ObjectBuilder<'a> {
        ObjectBuilder {
            logger: self,
            name,
            fields: vec![],
        }
    }
}

/// Builder for logging a named group of key/value fields as one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectBuilder<'a> {
    logger: &'a Logger,
    name: &'a str,
    fields: Vec<(&'a str, &'a str)>,
}

impl<'a> ObjectBuilder<'a> {
    pub fn add_field(mut self, name: &'a str, value: &'a str) -> Self {
        self.fields.push((name, value));
        self
    }

    pub fn log(&self, level: LogLevel) {
        let mut block = format!("{} {{", self.name);
        for (name, value) in &self.fields {
            block.push_str(&format!("\n  {}: {}", name, value));
        }
        block.push_str("\n}");

        self.logger.log(level, &block);
    }
}
