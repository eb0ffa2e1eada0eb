//! 评分区间实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grading_schemes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub scheme_name_id: i64,
    pub grade: String,
    pub score_range_begin: i16,
    pub score_range_end: i16,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::grading_scheme_names::Entity",
        from = "Column::SchemeNameId",
        to = "super::grading_scheme_names::Column::Id",
        on_delete = "Cascade"
    )]
    SchemeName,
}

impl Related<super::grading_scheme_names::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SchemeName.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_grading_scheme(self) -> crate::models::grading::entities::GradingScheme {
        crate::models::grading::entities::GradingScheme {
            id: self.id,
            scheme_name_id: self.scheme_name_id,
            grade: self.grade,
            score_range_begin: self.score_range_begin,
            score_range_end: self.score_range_end,
        }
    }
}
