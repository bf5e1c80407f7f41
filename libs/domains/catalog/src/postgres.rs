use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::{
    entity::{category, product},
    error::{CatalogError, CatalogResult},
    filter,
    models::{Category, NewProduct, Product, ProductFilter, SortDirection, SortField, UpdateProduct},
    repository::CatalogRepository,
};

pub struct PgCatalogRepository {
    db: DatabaseConnection,
}

impl PgCatalogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn sort_column(field: SortField) -> product::Column {
    match field {
        SortField::Name => product::Column::Name,
        SortField::Price => product::Column::Price,
        SortField::CreatedAt => product::Column::CreatedAt,
    }
}

/// ActiveModel with every field marked for writing, for inserts of rows
/// built client side.
fn write_all(model: product::Model) -> product::ActiveModel {
    product::ActiveModel {
        id: Set(model.id),
        name: Set(model.name),
        description: Set(model.description),
        price: Set(model.price),
        image_url: Set(model.image_url),
        category_id: Set(model.category_id),
        created_at: Set(model.created_at),
        updated_at: Set(model.updated_at),
    }
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn find_page(
        &self,
        criteria: &ProductFilter,
        page: u64,
        page_size: u64,
    ) -> CatalogResult<(Vec<Product>, u64)> {
        // One query shape for both the count and the page fetch, so the
        // metadata cannot skew against the content.
        let query = product::Entity::find()
            .find_also_related(category::Entity)
            .filter(filter::compile(criteria));

        let total = query.clone().count(&self.db).await?;

        let mut query = query;
        if let Some((field, direction)) = criteria.sort.as_deref().and_then(filter::parse_sort) {
            query = match direction {
                SortDirection::Asc => query.order_by_asc(sort_column(field)),
                SortDirection::Desc => query.order_by_desc(sort_column(field)),
            };
        }

        let rows = query
            .limit(page_size)
            .offset(page.saturating_mul(page_size))
            .all(&self.db)
            .await?;

        let products = rows
            .into_iter()
            .map(|(model, category)| {
                let category_name = category.map(|c| c.name).unwrap_or_default();
                model.into_product(category_name)
            })
            .collect();

        Ok((products, total))
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let row = product::Entity::find_by_id(id)
            .find_also_related(category::Entity)
            .one(&self.db)
            .await?;

        Ok(row.map(|(model, category)| {
            let category_name = category.map(|c| c.name).unwrap_or_default();
            model.into_product(category_name)
        }))
    }

    async fn insert(&self, input: NewProduct) -> CatalogResult<Product> {
        let category_name = input.category.name.clone();
        let model = product::Model::from_new(&input);

        let inserted = write_all(model).insert(&self.db).await?;

        Ok(inserted.into_product(category_name))
    }

    async fn insert_many(&self, inputs: Vec<NewProduct>) -> CatalogResult<Vec<Product>> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let models: Vec<product::Model> = inputs.iter().map(product::Model::from_new).collect();

        product::Entity::insert_many(models.iter().cloned().map(write_all))
            .exec(&self.db)
            .await?;

        // Ids were generated client side, so the insert order is the result
        // order without a RETURNING round trip.
        let products = models
            .into_iter()
            .zip(inputs)
            .map(|(model, input)| model.into_product(input.category.name))
            .collect();

        Ok(products)
    }

    async fn update(
        &self,
        id: Uuid,
        input: UpdateProduct,
        category: Option<Category>,
    ) -> CatalogResult<Product> {
        let (model, current_category) = product::Entity::find_by_id(id)
            .find_also_related(category::Entity)
            .one(&self.db)
            .await?
            .ok_or(CatalogError::NotFound(id))?;

        let mut active: product::ActiveModel = model.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(price) = input.price {
            active.price = Set(price);
        }
        if let Some(image_url) = input.image_url {
            active.image_url = Set(image_url);
        }

        let category_name = match category {
            Some(resolved) => {
                active.category_id = Set(resolved.id);
                resolved.name
            }
            None => current_category.map(|c| c.name).unwrap_or_default(),
        };

        active.updated_at = Set(chrono::Utc::now().into());

        let updated = active.update(&self.db).await?;

        Ok(updated.into_product(category_name))
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<()> {
        let result = product::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(CatalogError::NotFound(id));
        }

        Ok(())
    }

    async fn find_categories_by_name(&self, names: &[String]) -> CatalogResult<Vec<Category>> {
        let models = category::Entity::find()
            .filter(category::Column::Name.is_in(names.to_vec()))
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Category::from).collect())
    }

    async fn create_category(&self, name: &str) -> CatalogResult<Category> {
        let active = category::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(name.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        };

        let model = active.insert(&self.db).await?;

        Ok(model.into())
    }

    async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        let models = category::Entity::find()
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Category::from).collect())
    }
}
