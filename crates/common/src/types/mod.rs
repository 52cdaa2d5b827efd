use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Acknowledgement returned after a document was written to storage.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SaveAck {
    pub app: String,
    pub saved: bool,
}
