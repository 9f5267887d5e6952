// src/analyze/types.rs
use serde::{Deserialize, Serialize};

/// Used when a narrative yields no headed insight bullets.
pub const DEFAULT_INSIGHTS: [&str; 3] = [
    "성공 패턴: 명확한 문제 해결과 사용자 중심 접근",
    "기술 트렌드: 최신 기술 스택과 확장 가능한 아키텍처",
    "시장 기회: 성장하는 시장에서의 차별화된 가치 제안",
];

pub fn default_insights() -> Vec<String> {
    DEFAULT_INSIGHTS.iter().map(|s| s.to_string()).collect()
}

/// Whether (and which) AI-related technologies a narrative mentions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TechnologyUsage {
    pub used: bool,
    pub technologies: Vec<String>,
    pub code_example: Option<String>,
}

/// Structured result of parsing one narrative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Analysis {
    pub insights: Vec<String>,
    #[serde(rename = "aiTech")]
    pub technology: TechnologyUsage,
}

impl Default for Analysis {
    fn default() -> Self {
        Self {
            insights: default_insights(),
            technology: TechnologyUsage::default(),
        }
    }
}

impl Analysis {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
