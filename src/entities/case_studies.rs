use sea_orm::entity::prelude::*;

/// List-valued columns (`services`, `images`, `technologies`) are stored as
/// JSON-encoded TEXT; the repository handles the conversion.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "case_studies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    #[sea_orm(unique)]
    pub slug: String,

    pub excerpt: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub cover_image: String,

    pub client_name: String,

    pub client_industry: String,

    pub duration: Option<String>,

    pub services: String,

    #[sea_orm(column_type = "Text")]
    pub challenge: String,

    #[sea_orm(column_type = "Text")]
    pub solution: String,

    #[sea_orm(column_type = "Text")]
    pub result: String,

    pub images: Option<String>,

    pub technologies: Option<String>,

    pub testimonial: Option<String>,

    pub testimonial_author: Option<String>,

    pub testimonial_role: Option<String>,

    pub featured: bool,

    pub publish_date: String,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
