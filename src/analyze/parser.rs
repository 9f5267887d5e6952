// src/analyze/parser.rs
//! Narrative insight parser.
//!
//! Single forward pass over the narrative lines with a three-state section tracker.
//! Heading lines switch the section and are never captured; bullet lines are routed by the
//! current section. Anything else is ignored. Headings are matched by substring because
//! the narrative layout is not fixed, and the result degrades to defaults when nothing
//! usable is found.

use metrics::histogram;
use once_cell::sync::Lazy;
use regex::Regex;

use super::types::{default_insights, Analysis, TechnologyUsage};

const INSIGHT_HEADINGS: [&str; 2] = ["성공 요인", "핵심 인사이트"];
const AI_TECH_HEADINGS: [&str; 2] = ["AI 기술", "기술 스택"];
/// Lowercased keywords that mark a tech-section bullet as AI usage.
const AI_KEYWORDS: [&str; 3] = ["ai", "인공지능", "머신러닝"];

static RE_BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-•]\s*").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Insights,
    AiTech,
}

impl Section {
    /// Section a heading line switches to, if the line is a heading.
    fn from_heading(line: &str) -> Option<Section> {
        if INSIGHT_HEADINGS.iter().any(|h| line.contains(h)) {
            Some(Section::Insights)
        } else if AI_TECH_HEADINGS.iter().any(|h| line.contains(h)) {
            Some(Section::AiTech)
        } else {
            None
        }
    }
}

/// Bullet content with the marker and surrounding whitespace stripped.
///
/// The marker is tested on the trimmed line, so indented sub-bullets count as bullets.
fn bullet_content(line: &str) -> Option<&str> {
    let t = line.trim();
    if t.is_empty() || !(t.starts_with('-') || t.starts_with('•')) {
        return None;
    }
    let end = RE_BULLET.find(t).map(|m| m.end()).unwrap_or(0);
    Some(t[end..].trim())
}

fn mentions_ai(content: &str) -> bool {
    let lower = content.to_lowercase();
    AI_KEYWORDS.iter().any(|k| lower.contains(k))
}

pub fn parse(text: &str) -> Analysis {
    let t0 = std::time::Instant::now();

    let mut section = Section::None;
    let mut insights = Vec::new();
    let mut technology = TechnologyUsage::default();

    for line in text.lines() {
        if let Some(next) = Section::from_heading(line) {
            section = next;
            continue;
        }
        let Some(content) = bullet_content(line) else {
            continue;
        };
        match section {
            Section::Insights => insights.push(content.to_string()),
            Section::AiTech => {
                // Non-AI bullets here are dropped, not kept as insights.
                if mentions_ai(content) {
                    technology.used = true;
                    technology.technologies.push(content.to_string());
                }
            }
            Section::None => {}
        }
    }

    if insights.is_empty() {
        insights = default_insights();
    }
    if !technology.used {
        technology = TechnologyUsage::default();
    }

    histogram!("curator_parse_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
    Analysis {
        insights,
        technology,
    }
}
