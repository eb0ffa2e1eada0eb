use serde::Deserialize;

// 激活链接路径参数
#[derive(Debug, Deserialize)]
pub struct ActivationPath {
    pub uidb64: String,
    pub token: String,
}
