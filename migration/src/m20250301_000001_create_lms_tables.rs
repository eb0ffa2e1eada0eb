use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建评分方案名称表
        manager
            .create_table(
                Table::create()
                    .table(GradingSchemeNames::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GradingSchemeNames::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GradingSchemeNames::Name)
                            .string_len(250)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评分区间表，随方案名称级联删除
        manager
            .create_table(
                Table::create()
                    .table(GradingSchemes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GradingSchemes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GradingSchemes::SchemeNameId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GradingSchemes::Grade)
                            .string_len(250)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GradingSchemes::ScoreRangeBegin)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GradingSchemes::ScoreRangeEnd)
                            .small_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(GradingSchemes::Table, GradingSchemes::SchemeNameId)
                            .to(GradingSchemeNames::Table, GradingSchemeNames::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建课程表，评分方案删除时置空
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Courses::Title)
                            .string_len(250)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Courses::Thumbnail)
                            .string()
                            .not_null()
                            .default("default.png"),
                    )
                    .col(
                        ColumnDef::new(Courses::TimeZone)
                            .string_len(35)
                            .not_null()
                            .default("Asia/Kolkata"),
                    )
                    .col(ColumnDef::new(Courses::StartDate).big_integer().not_null())
                    .col(ColumnDef::new(Courses::EndDate).big_integer().not_null())
                    .col(
                        ColumnDef::new(Courses::GradingSchemeId)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Courses::Description).text().not_null())
                    .col(
                        ColumnDef::new(Courses::AllowSelfEnroll)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Courses::EnrollmentOpenToAll)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Courses::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Courses::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Courses::Table, Courses::GradingSchemeId)
                            .to(GradingSchemeNames::Table, GradingSchemeNames::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建分组表
        manager
            .create_table(
                Table::create()
                    .table(Sections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sections::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Sections::Name)
                            .string_len(250)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // 索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_grading_schemes_scheme_name_id")
                    .table(GradingSchemes::Table)
                    .col(GradingSchemes::SchemeNameId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_courses_grading_scheme_id")
                    .table(Courses::Table)
                    .col(Courses::GradingSchemeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_courses_start_date")
                    .table(Courses::Table)
                    .col(Courses::StartDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(Sections::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GradingSchemes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GradingSchemeNames::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum GradingSchemeNames {
    #[sea_orm(iden = "grading_scheme_names")]
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum GradingSchemes {
    #[sea_orm(iden = "grading_schemes")]
    Table,
    Id,
    SchemeNameId,
    Grade,
    ScoreRangeBegin,
    ScoreRangeEnd,
}

#[derive(DeriveIden)]
enum Courses {
    #[sea_orm(iden = "courses")]
    Table,
    Id,
    Title,
    Thumbnail,
    TimeZone,
    StartDate,
    EndDate,
    GradingSchemeId,
    Description,
    AllowSelfEnroll,
    EnrollmentOpenToAll,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Sections {
    #[sea_orm(iden = "sections")]
    Table,
    Id,
    Name,
}
