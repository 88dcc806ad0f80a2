use serde_json::{json, Map, Value};

use crate::dispatcher::Response;
use crate::registry::Controller;
use crate::router::ParamVec;

// Example controller: echoes the injected data and path variables back.
#[derive(Default)]
pub struct EchoController {
    data: Map<String, Value>,
    template: Option<String>,
}

impl EchoController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Controller for EchoController {
    fn inject(&mut self, data: Map<String, Value>) {
        self.data = data;
    }

    fn set_template(&mut self, template: &str) {
        self.template = Some(template.to_string());
    }

    fn call(&mut self, action: &str, vars: &ParamVec) -> anyhow::Result<Response> {
        let vars_map: Map<String, Value> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.clone())))
            .collect();
        Ok(Response::new(200, "OK").with_field(
            "echo",
            json!({
                "action": action,
                "data": self.data,
                "vars": vars_map,
                "template": self.template,
            }),
        ))
    }
}
