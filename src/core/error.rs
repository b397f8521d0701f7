use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("入力データが不正です: {required}バイト必要ですが{actual}バイトしかありません")]
    MalformedInput { required: usize, actual: usize },

    #[error("16進数文字列の解析に失敗しました: {0}")]
    InvalidHex(String),

    #[error("ペイロードが指定されていません")]
    MissingPayload,

    #[error("{0}アドレスが指定されていません")]
    MissingAddress(&'static str),

    #[error("疑似ヘッダーに未対応のアドレスファミリーです: {0}")]
    UnsupportedAddressFamily(String),

    #[error("UDPデータグラムが大きすぎます: {0}バイト")]
    PayloadTooLarge(usize),

    #[error("設定エラー: {0}")]
    Config(String),
}

pub type CodecResult<T> = Result<T, CodecError>;

#[derive(Error, Debug)]
pub enum InitProcessError {
    #[error("ロガーのセットアップに失敗しました: {0}")]
    LoggerError(String),

    #[error("設定の読み込みに失敗しました: {0}")]
    ConfigError(String),

    #[error("出力の生成に失敗しました: {0}")]
    OutputError(String),

    #[error("コーデックエラー: {0}")]
    Codec(#[from] CodecError),
}
