//! `PopupRepository` implementation for `SqliteStore`.

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use sea_orm::{
    ActiveValue::{NotSet, Set},
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use popup_builder_core::error::{CoreError, CoreResult};
use popup_builder_core::traits::PopupRepository;
use popup_builder_core::types::{NewPopup, PopupChanges, PopupListQuery, PopupRecord};
use popup_builder_core::utils::datetime;

use super::entity::popup;
use super::SqliteStore;

// Timestamps are stored with millisecond precision, so writes truncate to it.
fn parse_timestamp(field: &str, value: &str) -> CoreResult<DateTime<Utc>> {
    datetime::parse_rfc3339(value)
        .ok_or_else(|| CoreError::SerializationError(format!("Invalid {field}: {value}")))
}

impl popup::Model {
    /// Convert a `SeaORM` row model into a `PopupRecord`.
    fn into_record(self) -> CoreResult<PopupRecord> {
        Ok(PopupRecord {
            created_at: parse_timestamp("created_at", &self.created_at)?,
            updated_at: parse_timestamp("updated_at", &self.updated_at)?,
            id: self.id,
            name: self.name,
            template: self.template,
            headline: self.headline,
            subheadline: self.subheadline,
            button_text: self.button_text,
            background_color: self.background_color,
            text_color: self.text_color,
            button_color: self.button_color,
            border_radius: self.border_radius,
            show_image: self.show_image != 0,
            show_close_button: self.show_close_button != 0,
            show_overlay: self.show_overlay != 0,
            close_on_outside_click: self.close_on_outside_click != 0,
            animation_enabled: self.animation_enabled != 0,
            animation_style: self.animation_style,
            embed_code: self.embed_code,
            is_published: self.is_published != 0,
            flow_data: self.flow_data,
        })
    }
}

/// Every column of a record as an active model; the id is left unset for inserts.
fn record_to_active_model(record: &PopupRecord, with_id: bool) -> popup::ActiveModel {
    popup::ActiveModel {
        id: if with_id { Set(record.id) } else { NotSet },
        name: Set(record.name.clone()),
        template: Set(record.template.clone()),
        headline: Set(record.headline.clone()),
        subheadline: Set(record.subheadline.clone()),
        button_text: Set(record.button_text.clone()),
        background_color: Set(record.background_color.clone()),
        text_color: Set(record.text_color.clone()),
        button_color: Set(record.button_color.clone()),
        border_radius: Set(record.border_radius),
        show_image: Set(i32::from(record.show_image)),
        show_close_button: Set(i32::from(record.show_close_button)),
        show_overlay: Set(i32::from(record.show_overlay)),
        close_on_outside_click: Set(i32::from(record.close_on_outside_click)),
        animation_enabled: Set(i32::from(record.animation_enabled)),
        animation_style: Set(record.animation_style.clone()),
        embed_code: Set(record.embed_code.clone()),
        is_published: Set(i32::from(record.is_published)),
        flow_data: Set(record.flow_data.clone()),
        created_at: Set(datetime::format(&record.created_at)),
        updated_at: Set(datetime::format(&record.updated_at)),
    }
}

#[async_trait]
impl PopupRepository for SqliteStore {
    async fn find_by_id(&self, id: i32) -> CoreResult<Option<PopupRecord>> {
        let row = popup::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query popup: {e}")))?;

        row.map(popup::Model::into_record).transpose()
    }

    async fn list(&self, query: &PopupListQuery) -> CoreResult<Vec<PopupRecord>> {
        let mut select = popup::Entity::find();
        if let Some(term) = query.search.as_deref().filter(|t| !t.is_empty()) {
            select = select.filter(
                Condition::any()
                    .add(popup::Column::Name.contains(term))
                    .add(popup::Column::Headline.contains(term)),
            );
        }

        let rows = select
            .order_by_desc(popup::Column::CreatedAt)
            .order_by_desc(popup::Column::Id)
            .limit(query.limit)
            .offset(query.offset)
            .all(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to list popups: {e}")))?;

        rows.into_iter().map(popup::Model::into_record).collect()
    }

    async fn insert_at(
        &self,
        new_popup: NewPopup,
        created_at: DateTime<Utc>,
    ) -> CoreResult<PopupRecord> {
        // id 0 is a placeholder; SQLite assigns the real one
        let pending = new_popup.into_record(0, created_at.trunc_subsecs(3));

        let result = popup::Entity::insert(record_to_active_model(&pending, false))
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to insert popup: {e}")))?;

        Ok(PopupRecord {
            id: result.last_insert_id,
            ..pending
        })
    }

    async fn update(&self, id: i32, changes: &PopupChanges) -> CoreResult<Option<PopupRecord>> {
        let Some(mut record) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        changes.apply(&mut record, Utc::now().trunc_subsecs(3));

        popup::Entity::update(record_to_active_model(&record, true))
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to update popup: {e}")))?;

        Ok(Some(record))
    }

    async fn delete(&self, id: i32) -> CoreResult<Option<PopupRecord>> {
        let Some(record) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        popup::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to delete popup: {e}")))?;

        Ok(Some(record))
    }

    async fn count(&self) -> CoreResult<u64> {
        popup::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to count popups: {e}")))
    }
}
