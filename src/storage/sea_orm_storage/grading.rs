//! 评分方案存储操作

use super::{SeaOrmStorage, db_err};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::grading_scheme_names::{
    ActiveModel as NameActiveModel, Column as NameColumn, Entity as GradingSchemeNames,
};
use crate::entity::grading_schemes::{
    ActiveModel as SchemeActiveModel, Column as SchemeColumn, Entity as GradingSchemes,
};
use crate::errors::{LmsError, Result};
use crate::models::grading::{
    entities::{
        COURSE_SCHEME_ON_NAME_DELETE, DeletePolicy, GradingScheme, GradingSchemeDraft,
        GradingSchemeName, SCHEME_BANDS_ON_NAME_DELETE,
    },
    requests::GradingSchemeChanges,
    responses::GradingSchemeNameDeletion,
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;

impl SeaOrmStorage {
    /// 创建评分方案名称
    pub async fn create_grading_scheme_name_impl(&self, name: &str) -> Result<GradingSchemeName> {
        let model = NameActiveModel {
            name: Set(name.trim().to_string()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("Failed to create grading scheme name"))?;

        Ok(result.into_grading_scheme_name())
    }

    /// 通过 ID 获取评分方案名称
    pub async fn get_grading_scheme_name_by_id_impl(
        &self,
        id: i64,
    ) -> Result<Option<GradingSchemeName>> {
        let result = GradingSchemeNames::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query grading scheme name"))?;

        Ok(result.map(|m| m.into_grading_scheme_name()))
    }

    /// 列出全部评分方案名称
    pub async fn list_grading_scheme_names_impl(&self) -> Result<Vec<GradingSchemeName>> {
        let result = GradingSchemeNames::find()
            .order_by_asc(NameColumn::Name)
            .all(&self.db)
            .await
            .map_err(db_err("Failed to list grading scheme names"))?;

        Ok(result
            .into_iter()
            .map(|m| m.into_grading_scheme_name())
            .collect())
    }

    /// 删除评分方案名称
    ///
    /// 在同一事务内按两条外键的删除策略处理引用方，再删除名称本身；
    /// 不依赖数据库是否开启外键约束。
    pub async fn delete_grading_scheme_name_impl(
        &self,
        id: i64,
    ) -> Result<Option<GradingSchemeNameDeletion>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_err("Failed to begin transaction"))?;

        let existing = GradingSchemeNames::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err("Failed to query grading scheme name"))?;
        if existing.is_none() {
            return Ok(None);
        }

        let deleted_bands = match SCHEME_BANDS_ON_NAME_DELETE {
            DeletePolicy::CascadeDelete => cascade_delete_bands(&txn, id).await?,
            DeletePolicy::ClearReference => {
                return Err(LmsError::database_operation(
                    "grading_schemes.scheme_name_id is not nullable",
                ));
            }
        };

        let cleared_courses = match COURSE_SCHEME_ON_NAME_DELETE {
            DeletePolicy::ClearReference => clear_course_references(&txn, id).await?,
            DeletePolicy::CascadeDelete => Courses::delete_many()
                .filter(CourseColumn::GradingSchemeId.eq(id))
                .exec(&txn)
                .await
                .map_err(db_err("Failed to delete courses"))?
                .rows_affected,
        };

        GradingSchemeNames::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err("Failed to delete grading scheme name"))?;

        txn.commit()
            .await
            .map_err(db_err("Failed to commit transaction"))?;

        info!(
            "Grading scheme name {} deleted ({} bands removed, {} courses detached)",
            id, deleted_bands, cleared_courses
        );

        Ok(Some(GradingSchemeNameDeletion {
            scheme_name_id: id,
            deleted_bands,
            cleared_courses,
        }))
    }

    /// 创建评分区间
    pub async fn create_grading_scheme_impl(
        &self,
        draft: GradingSchemeDraft,
    ) -> Result<GradingScheme> {
        let model = SchemeActiveModel {
            scheme_name_id: Set(draft.scheme_name_id),
            grade: Set(draft.grade.trim().to_string()),
            score_range_begin: Set(draft.score_range_begin),
            score_range_end: Set(draft.score_range_end),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("Failed to create grading scheme"))?;

        Ok(result.into_grading_scheme())
    }

    /// 通过 ID 获取评分区间
    pub async fn get_grading_scheme_by_id_impl(&self, id: i64) -> Result<Option<GradingScheme>> {
        let result = GradingSchemes::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query grading scheme"))?;

        Ok(result.map(|m| m.into_grading_scheme()))
    }

    /// 列出某个评分方案下的全部区间，按下界升序
    pub async fn list_grading_schemes_impl(&self, scheme_name_id: i64) -> Result<Vec<GradingScheme>> {
        let result = GradingSchemes::find()
            .filter(SchemeColumn::SchemeNameId.eq(scheme_name_id))
            .order_by_asc(SchemeColumn::ScoreRangeBegin)
            .order_by_asc(SchemeColumn::Id)
            .all(&self.db)
            .await
            .map_err(db_err("Failed to list grading schemes"))?;

        Ok(result.into_iter().map(|m| m.into_grading_scheme()).collect())
    }

    /// 更新评分区间
    pub async fn update_grading_scheme_impl(
        &self,
        id: i64,
        changes: GradingSchemeChanges,
    ) -> Result<Option<GradingScheme>> {
        // 先检查区间是否存在
        if self.get_grading_scheme_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = SchemeActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(grade) = changes.grade {
            model.grade = Set(grade.trim().to_string());
        }
        if let Some(begin) = changes.score_range_begin {
            model.score_range_begin = Set(begin);
        }
        if let Some(end) = changes.score_range_end {
            model.score_range_end = Set(end);
        }

        model
            .update(&self.db)
            .await
            .map_err(db_err("Failed to update grading scheme"))?;

        self.get_grading_scheme_by_id_impl(id).await
    }
}

async fn cascade_delete_bands(txn: &DatabaseTransaction, scheme_name_id: i64) -> Result<u64> {
    let result = GradingSchemes::delete_many()
        .filter(SchemeColumn::SchemeNameId.eq(scheme_name_id))
        .exec(txn)
        .await
        .map_err(db_err("Failed to delete grading schemes"))?;
    Ok(result.rows_affected)
}

async fn clear_course_references(txn: &DatabaseTransaction, scheme_name_id: i64) -> Result<u64> {
    let now = chrono::Utc::now().timestamp();
    let result = Courses::update_many()
        .col_expr(CourseColumn::GradingSchemeId, Expr::value(Option::<i64>::None))
        .col_expr(CourseColumn::UpdatedAt, Expr::value(now))
        .filter(CourseColumn::GradingSchemeId.eq(scheme_name_id))
        .exec(txn)
        .await
        .map_err(db_err("Failed to clear course grading scheme references"))?;
    Ok(result.rows_affected)
}
