use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::Result;
use crate::utils::validate::{MAX_CHAR_FIELD_LENGTH, validate_char_field, validate_score_range};

/// 外键删除策略
///
/// - `CascadeDelete`：删除被引用记录时一并删除引用方
/// - `ClearReference`：删除被引用记录时将引用字段置空
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePolicy {
    CascadeDelete,
    ClearReference,
}

/// `GradingScheme.scheme_name_id` -> `GradingSchemeName.id`
pub const SCHEME_BANDS_ON_NAME_DELETE: DeletePolicy = DeletePolicy::CascadeDelete;
/// `Course.grading_scheme_id` -> `GradingSchemeName.id`
pub const COURSE_SCHEME_ON_NAME_DELETE: DeletePolicy = DeletePolicy::ClearReference;

/// 评分方案名称，例如 "Standard"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "grading.ts")]
pub struct GradingSchemeName {
    pub id: i64,
    pub name: String,
}

impl GradingSchemeName {
    pub fn validate_name(name: &str) -> Result<()> {
        validate_char_field("name", name, MAX_CHAR_FIELD_LENGTH)
    }
}

/// 评分方案中的一个等级区间 `[score_range_begin, score_range_end)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "grading.ts")]
pub struct GradingScheme {
    pub id: i64,
    pub scheme_name_id: i64,
    pub grade: String,
    pub score_range_begin: i16,
    pub score_range_end: i16,
}

impl GradingScheme {
    /// 分数是否落在本区间（含下界，不含上界）
    pub fn contains(&self, score: i16) -> bool {
        self.score_range_begin <= score && score < self.score_range_end
    }
}

/// 待保存的评分区间
#[derive(Debug, Clone, PartialEq)]
pub struct GradingSchemeDraft {
    pub scheme_name_id: i64,
    pub grade: String,
    pub score_range_begin: i16,
    pub score_range_end: i16,
}

impl GradingSchemeDraft {
    pub fn validate(&self) -> Result<()> {
        validate_char_field("grade", &self.grade, MAX_CHAR_FIELD_LENGTH)?;
        validate_score_range(Some(self.score_range_begin), Some(self.score_range_end))
    }
}

/// 区间覆盖中的缺口或重叠
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "grading.ts")]
pub struct ScoreSpan {
    pub begin: i16,
    pub end: i16,
}

/// 一个评分方案下全部区间的覆盖情况
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "grading.ts")]
pub struct BandCoverage {
    pub band_count: usize,
    pub lowest_score: Option<i16>,
    pub highest_score: Option<i16>,
    pub gaps: Vec<ScoreSpan>,
    pub overlaps: Vec<ScoreSpan>,
}

/// 一个评分方案的全部区间，按下界排序
#[derive(Debug, Clone, Default)]
pub struct GradingBands {
    bands: Vec<GradingScheme>,
}

impl GradingBands {
    pub fn new(mut bands: Vec<GradingScheme>) -> Self {
        bands.sort_by_key(|b| (b.score_range_begin, b.score_range_end));
        Self { bands }
    }

    pub fn bands(&self) -> &[GradingScheme] {
        &self.bands
    }

    pub fn into_bands(self) -> Vec<GradingScheme> {
        self.bands
    }

    /// 将分数换算为等级；多个区间重叠时取下界最小的那个
    pub fn grade_for(&self, score: i16) -> Option<&str> {
        self.bands
            .iter()
            .find(|b| b.contains(score))
            .map(|b| b.grade.as_str())
    }

    /// 计算相邻区间之间的缺口与重叠；空区间 `[x, x)` 不参与计算
    pub fn coverage(&self) -> BandCoverage {
        let non_empty: Vec<&GradingScheme> = self
            .bands
            .iter()
            .filter(|b| b.score_range_end > b.score_range_begin)
            .collect();

        let mut gaps = Vec::new();
        let mut overlaps = Vec::new();
        let mut reach: Option<i16> = None;

        for band in &non_empty {
            if let Some(covered_to) = reach {
                if band.score_range_begin > covered_to {
                    gaps.push(ScoreSpan {
                        begin: covered_to,
                        end: band.score_range_begin,
                    });
                } else if band.score_range_begin < covered_to {
                    overlaps.push(ScoreSpan {
                        begin: band.score_range_begin,
                        end: covered_to.min(band.score_range_end),
                    });
                }
            }
            reach = Some(reach.map_or(band.score_range_end, |r| r.max(band.score_range_end)));
        }

        BandCoverage {
            band_count: self.bands.len(),
            lowest_score: non_empty.first().map(|b| b.score_range_begin),
            highest_score: reach,
            gaps,
            overlaps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band(id: i64, grade: &str, begin: i16, end: i16) -> GradingScheme {
        GradingScheme {
            id,
            scheme_name_id: 1,
            grade: grade.to_string(),
            score_range_begin: begin,
            score_range_end: end,
        }
    }

    fn standard() -> GradingBands {
        GradingBands::new(vec![
            band(1, "A", 90, 101),
            band(2, "C", 70, 80),
            band(3, "B", 80, 90),
            band(4, "F", 0, 70),
        ])
    }

    #[test]
    fn test_half_open_lookup() {
        let bands = standard();
        assert_eq!(bands.grade_for(90), Some("A"));
        assert_eq!(bands.grade_for(89), Some("B"));
        assert_eq!(bands.grade_for(80), Some("B"));
        assert_eq!(bands.grade_for(0), Some("F"));
        assert_eq!(bands.grade_for(100), Some("A"));
        assert_eq!(bands.grade_for(101), None);
        assert_eq!(bands.grade_for(-1), None);
    }

    #[test]
    fn test_bands_are_sorted() {
        let bands = standard();
        let grades: Vec<&str> = bands.bands().iter().map(|b| b.grade.as_str()).collect();
        assert_eq!(grades, vec!["F", "C", "B", "A"]);
    }

    #[test]
    fn test_contiguous_coverage() {
        let coverage = standard().coverage();
        assert_eq!(coverage.band_count, 4);
        assert_eq!(coverage.lowest_score, Some(0));
        assert_eq!(coverage.highest_score, Some(101));
        assert!(coverage.gaps.is_empty());
        assert!(coverage.overlaps.is_empty());
    }

    #[test]
    fn test_gaps_and_overlaps() {
        let bands = GradingBands::new(vec![
            band(1, "F", 0, 50),
            band(2, "D", 60, 75),
            band(3, "C", 70, 80),
            band(4, "X", 85, 85),
        ]);
        let coverage = bands.coverage();
        assert_eq!(coverage.gaps, vec![ScoreSpan { begin: 50, end: 60 }]);
        assert_eq!(coverage.overlaps, vec![ScoreSpan { begin: 70, end: 75 }]);
        assert_eq!(coverage.highest_score, Some(80));
        assert_eq!(coverage.band_count, 4);
    }

    #[test]
    fn test_empty_coverage() {
        let coverage = GradingBands::default().coverage();
        assert_eq!(coverage.band_count, 0);
        assert_eq!(coverage.lowest_score, None);
        assert_eq!(coverage.highest_score, None);
    }

    #[test]
    fn test_draft_validation() {
        let draft = GradingSchemeDraft {
            scheme_name_id: 1,
            grade: "A".into(),
            score_range_begin: 90,
            score_range_end: 80,
        };
        assert!(matches!(
            draft.validate(),
            Err(crate::errors::LmsError::ScoreRange(_))
        ));

        let draft = GradingSchemeDraft {
            grade: " ".into(),
            score_range_end: 100,
            ..draft
        };
        assert!(matches!(
            draft.validate(),
            Err(crate::errors::LmsError::Validation(_))
        ));
    }
}
