use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "popups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub template: Option<String>,
    pub headline: String,
    pub subheadline: Option<String>,
    pub button_text: String,
    pub background_color: String,
    pub text_color: String,
    pub button_color: String,
    pub border_radius: i32,
    pub show_image: i32,
    pub show_close_button: i32,
    pub show_overlay: i32,
    pub close_on_outside_click: i32,
    pub animation_enabled: i32,
    pub animation_style: String,
    pub embed_code: Option<String>,
    pub is_published: i32,
    pub flow_data: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
