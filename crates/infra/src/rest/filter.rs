use std::fmt::Display;

/// Server-side query expression over a collection, rendered to the
/// `field=operator.value` query-string dialect the REST interface speaks.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    conditions: Vec<String>,
    select: Option<String>,
    order: Option<String>,
}

impl Filter {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn eq<T: Display>(mut self, field: &str, value: T) -> Self {
        self.conditions.push(format!("{}=eq.{}", field, value));
        self
    }

    pub fn neq<T: Display>(mut self, field: &str, value: T) -> Self {
        self.conditions.push(format!("{}=neq.{}", field, value));
        self
    }

    /// Inclusion over a list of values: `field=in.(a,b,c)`.
    pub fn any_of<T: Display>(mut self, field: &str, values: &[T]) -> Self {
        let values = values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.conditions.push(format!("{}=in.({})", field, values));
        self
    }

    pub fn is_true(mut self, field: &str) -> Self {
        self.conditions.push(format!("{}=is.true", field));
        self
    }

    pub fn is_false(mut self, field: &str) -> Self {
        self.conditions.push(format!("{}=is.false", field));
        self
    }

    /// Field projection: `select=a,b,c`.
    pub fn select(mut self, fields: &[&str]) -> Self {
        self.select = Some(fields.join(","));
        self
    }

    pub fn order_asc(mut self, field: &str) -> Self {
        self.order = Some(format!("{}.asc", field));
        self
    }

    pub fn order_desc(mut self, field: &str) -> Self {
        self.order = Some(format!("{}.desc", field));
        self
    }

    pub fn to_query_string(&self) -> String {
        let mut parts = self.conditions.clone();
        if let Some(select) = &self.select {
            parts.push(format!("select={}", select));
        }
        if let Some(order) = &self.order {
            parts.push(format!("order={}", order));
        }
        parts.join("&")
    }
}
