//! Property task: define a property mid-run

use crate::config::PropertyConfig;
use crate::engine::Context;
use crate::error::Result;

/// Adds a property to the store when executed
///
/// The property name is interpolated at execution time; the value is stored
/// raw, so references inside it resolve on read like any other property.
/// Properties are append-only, which makes re-defining an existing name an
/// error.
#[derive(Debug, Clone)]
pub struct PropertyTask {
    name: String,
    value: String,
}

impl PropertyTask {
    pub fn new(name: &str, value: &str) -> Self {
        PropertyTask {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    pub fn from_config(config: PropertyConfig) -> Self {
        PropertyTask {
            name: config.name,
            value: config.value,
        }
    }

    pub fn execute(&self, ctx: &mut Context) -> Result<()> {
        let name = ctx.properties.filter(&self.name)?;
        ctx.properties.add(&name, &self.value)?;
        ctx.logger.debug(&format!("Added property '{}'", name));
        Ok(())
    }
}
