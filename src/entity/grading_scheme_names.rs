//! 评分方案名称实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grading_scheme_names")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::grading_schemes::Entity")]
    GradingSchemes,
    #[sea_orm(has_many = "super::courses::Entity")]
    Courses,
}

impl Related<super::grading_schemes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GradingSchemes.def()
    }
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Courses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_grading_scheme_name(self) -> crate::models::grading::entities::GradingSchemeName {
        crate::models::grading::entities::GradingSchemeName {
            id: self.id,
            name: self.name,
        }
    }
}
