//! Echo task: print an interpolated message

use crate::config::EchoConfig;
use crate::engine::Context;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct EchoTask {
    message: String,
}

impl EchoTask {
    pub fn new(message: &str) -> Self {
        EchoTask {
            message: message.to_string(),
        }
    }

    pub fn from_config(config: EchoConfig) -> Self {
        match config {
            EchoConfig::Simple(message) => EchoTask { message },
            EchoConfig::Detail { message } => EchoTask { message },
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn execute(&self, ctx: &mut Context) -> Result<()> {
        let message = ctx.properties.filter(&self.message)?;
        ctx.logger.echo(&message);
        Ok(())
    }
}
