//! 预导入模块，方便使用

pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::grading_scheme_names::{
    ActiveModel as GradingSchemeNameActiveModel, Entity as GradingSchemeNames,
    Model as GradingSchemeNameModel,
};
pub use super::grading_schemes::{
    ActiveModel as GradingSchemeActiveModel, Entity as GradingSchemes,
    Model as GradingSchemeModel,
};
pub use super::sections::{ActiveModel as SectionActiveModel, Entity as Sections, Model as SectionModel};
