//! 课程实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub title: String,
    pub thumbnail: String,
    pub time_zone: String,
    pub start_date: i64,
    pub end_date: i64,
    pub grading_scheme_id: Option<i64>,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub allow_self_enroll: bool,
    pub enrollment_open_to_all: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::grading_scheme_names::Entity",
        from = "Column::GradingSchemeId",
        to = "super::grading_scheme_names::Column::Id",
        on_delete = "SetNull"
    )]
    GradingScheme,
}

impl Related<super::grading_scheme_names::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GradingScheme.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_course(self) -> crate::models::courses::entities::Course {
        use crate::models::courses::entities::Course;
        use chrono::{DateTime, Utc};

        Course {
            id: self.id,
            title: self.title,
            thumbnail: self.thumbnail,
            time_zone: self.time_zone,
            start_date: DateTime::<Utc>::from_timestamp(self.start_date, 0).unwrap_or_default(),
            end_date: DateTime::<Utc>::from_timestamp(self.end_date, 0).unwrap_or_default(),
            grading_scheme_id: self.grading_scheme_id,
            description: self.description,
            allow_self_enroll: self.allow_self_enroll,
            enrollment_open_to_all: self.enrollment_open_to_all,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
