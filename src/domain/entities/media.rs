use serde::{Deserialize, Serialize};

/// 외부 미디어 호스트에 업로드된 파일 참조
///
/// `public_id`는 삭제 요청에, `resource_type`은 삭제 엔드포인트 선택에 사용됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaAsset {
    pub url: String,
    pub public_id: String,
    pub resource_type: String,
    /// 동영상 길이(초). 이미지는 `None`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}
