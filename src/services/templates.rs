use handlebars::Handlebars;
use serde_json::Value;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template render error: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("Template load error: {0}")]
    Load(String),
}

/// Handlebars registry over the `templates/` directory. Each `<NAME>.html`
/// file becomes a document template addressable by its stem, e.g.
/// `OFFER_LETTER` or `PAYSLIP`.
pub struct TemplateEngine {
    registry: Handlebars<'static>,
}

impl TemplateEngine {
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();

        let entries = std::fs::read_dir(dir.as_ref())
            .map_err(|e| TemplateError::Load(format!("{}: {}", dir.as_ref().display(), e)))?;

        for entry in entries {
            let entry = entry.map_err(|e| TemplateError::Load(e.to_string()))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("html") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            registry
                .register_template_file(name, &path)
                .map_err(|e| TemplateError::Load(e.to_string()))?;
        }

        Ok(Self { registry })
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.registry.has_template(name)
    }

    pub fn render(&self, name: &str, data: &Value) -> Result<String, TemplateError> {
        if !self.registry.has_template(name) {
            return Err(TemplateError::NotFound(name.to_string()));
        }
        Ok(self.registry.render(name, data)?)
    }
}

/// Formats an amount with Indian digit grouping, e.g. 1234567 -> "12,34,567".
/// Fractions are rounded away; payroll figures are whole rupees.
pub fn format_inr(amount: f64) -> String {
    let negative = amount < 0.0;
    let digits = (amount.abs().round() as u64).to_string();

    if digits.len() <= 3 {
        return if negative { format!("-{}", digits) } else { digits };
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    let sign = if negative { "-" } else { "" };
    format!("{}{},{}", sign, groups.join(","), tail)
}
