use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompassError {
    #[error("無法取得定位：{0}")]
    LocationUnavailable(String),

    #[error("請輸入手動地址")]
    MissingManualAddress,

    #[error("哎呀！AI 腦袋打結了，請稍後再試一次！({0})")]
    AiRequestFailed(String),

    #[error("API Key not found")]
    AiMisconfigured,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CompassError>;
