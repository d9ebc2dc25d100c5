/// Public identity of an IQ application, resolved from its internal owner id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationIdentity {
    public_id: String,
    display_name: String,
}

impl ApplicationIdentity {
    /// Returns `None` when the public id is blank; an identity without one is
    /// never handed to the rest of the pipeline. A blank display name falls
    /// back to the public id so page titles always name the application.
    pub fn new(public_id: impl Into<String>, display_name: impl Into<String>) -> Option<Self> {
        let public_id: String = public_id.into();
        if public_id.trim().is_empty() {
            return None;
        }
        let display_name: String = display_name.into();
        let display_name = if display_name.trim().is_empty() {
            public_id.clone()
        } else {
            display_name
        };
        Some(Self {
            public_id,
            display_name,
        })
    }

    pub fn public_id(&self) -> &str {
        &self.public_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}
