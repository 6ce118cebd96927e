use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::case_studies;

/// A case study with its list-valued columns decoded from JSON.
#[derive(Debug, Clone)]
pub struct CaseStudy {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub description: String,
    pub cover_image: String,
    pub client_name: String,
    pub client_industry: String,
    pub duration: Option<String>,
    pub services: Vec<String>,
    pub challenge: String,
    pub solution: String,
    pub result: String,
    pub images: Option<Vec<String>>,
    pub technologies: Option<Vec<String>>,
    pub testimonial: Option<String>,
    pub testimonial_author: Option<String>,
    pub testimonial_role: Option<String>,
    pub featured: bool,
    pub publish_date: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields required to create a case study.
#[derive(Debug, Clone)]
pub struct CaseStudyInput {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub description: String,
    pub cover_image: String,
    pub client_name: String,
    pub client_industry: String,
    pub duration: Option<String>,
    pub services: Vec<String>,
    pub challenge: String,
    pub solution: String,
    pub result: String,
    pub images: Option<Vec<String>>,
    pub technologies: Option<Vec<String>>,
    pub testimonial: Option<String>,
    pub testimonial_author: Option<String>,
    pub testimonial_role: Option<String>,
    pub featured: bool,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct CaseStudyPatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub client_name: Option<String>,
    pub client_industry: Option<String>,
    pub duration: Option<Option<String>>,
    pub services: Option<Vec<String>>,
    pub challenge: Option<String>,
    pub solution: Option<String>,
    pub result: Option<String>,
    pub images: Option<Option<Vec<String>>>,
    pub technologies: Option<Option<Vec<String>>>,
    pub testimonial: Option<Option<String>>,
    pub testimonial_author: Option<Option<String>>,
    pub testimonial_role: Option<Option<String>>,
    pub featured: Option<bool>,
}

impl From<case_studies::Model> for CaseStudy {
    fn from(m: case_studies::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            slug: m.slug,
            excerpt: m.excerpt,
            description: m.description,
            cover_image: m.cover_image,
            client_name: m.client_name,
            client_industry: m.client_industry,
            duration: m.duration,
            services: decode_list(&m.services),
            challenge: m.challenge,
            solution: m.solution,
            result: m.result,
            images: m.images.as_deref().map(decode_list),
            technologies: m.technologies.as_deref().map(decode_list),
            testimonial: m.testimonial,
            testimonial_author: m.testimonial_author,
            testimonial_role: m.testimonial_role,
            featured: m.featured,
            publish_date: m.publish_date,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

fn decode_list(json: &str) -> Vec<String> {
    serde_json::from_str(json).unwrap_or_default()
}

fn encode_list(items: &[String]) -> Result<String> {
    serde_json::to_string(items).context("Failed to encode list column")
}

pub struct CaseStudyRepository {
    conn: DatabaseConnection,
}

impl CaseStudyRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// List case studies, newest publish date first.
    pub async fn list(&self, limit: Option<u64>, featured: Option<bool>) -> Result<Vec<CaseStudy>> {
        let mut query = case_studies::Entity::find()
            .order_by_desc(case_studies::Column::PublishDate);

        if let Some(featured) = featured {
            query = query.filter(case_studies::Column::Featured.eq(featured));
        }
        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let models = query
            .all(&self.conn)
            .await
            .context("Failed to list case studies")?;

        Ok(models.into_iter().map(CaseStudy::from).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<CaseStudy>> {
        let model = case_studies::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query case study by ID")?;

        Ok(model.map(CaseStudy::from))
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<CaseStudy>> {
        let model = case_studies::Entity::find()
            .filter(case_studies::Column::Slug.eq(slug))
            .one(&self.conn)
            .await
            .context("Failed to query case study by slug")?;

        Ok(model.map(CaseStudy::from))
    }

    pub async fn create(&self, input: CaseStudyInput) -> Result<CaseStudy> {
        let now = chrono::Utc::now().to_rfc3339();

        let active = case_studies::ActiveModel {
            title: Set(input.title),
            slug: Set(input.slug),
            excerpt: Set(input.excerpt),
            description: Set(input.description),
            cover_image: Set(input.cover_image),
            client_name: Set(input.client_name),
            client_industry: Set(input.client_industry),
            duration: Set(input.duration),
            services: Set(encode_list(&input.services)?),
            challenge: Set(input.challenge),
            solution: Set(input.solution),
            result: Set(input.result),
            images: Set(input.images.as_deref().map(encode_list).transpose()?),
            technologies: Set(input.technologies.as_deref().map(encode_list).transpose()?),
            testimonial: Set(input.testimonial),
            testimonial_author: Set(input.testimonial_author),
            testimonial_role: Set(input.testimonial_role),
            featured: Set(input.featured),
            publish_date: Set(now.clone()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert case study")?;

        Ok(CaseStudy::from(model))
    }

    /// Apply a partial update; returns `None` when the row does not exist.
    pub async fn update(&self, id: i32, patch: CaseStudyPatch) -> Result<Option<CaseStudy>> {
        let Some(existing) = case_studies::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query case study for update")?
        else {
            return Ok(None);
        };

        let mut active: case_studies::ActiveModel = existing.into();

        if let Some(title) = patch.title {
            active.title = Set(title);
        }
        if let Some(slug) = patch.slug {
            active.slug = Set(slug);
        }
        if let Some(excerpt) = patch.excerpt {
            active.excerpt = Set(excerpt);
        }
        if let Some(description) = patch.description {
            active.description = Set(description);
        }
        if let Some(cover_image) = patch.cover_image {
            active.cover_image = Set(cover_image);
        }
        if let Some(client_name) = patch.client_name {
            active.client_name = Set(client_name);
        }
        if let Some(client_industry) = patch.client_industry {
            active.client_industry = Set(client_industry);
        }
        if let Some(duration) = patch.duration {
            active.duration = Set(duration);
        }
        if let Some(services) = patch.services {
            active.services = Set(encode_list(&services)?);
        }
        if let Some(challenge) = patch.challenge {
            active.challenge = Set(challenge);
        }
        if let Some(solution) = patch.solution {
            active.solution = Set(solution);
        }
        if let Some(result) = patch.result {
            active.result = Set(result);
        }
        if let Some(images) = patch.images {
            active.images = Set(images.as_deref().map(encode_list).transpose()?);
        }
        if let Some(technologies) = patch.technologies {
            active.technologies = Set(technologies.as_deref().map(encode_list).transpose()?);
        }
        if let Some(testimonial) = patch.testimonial {
            active.testimonial = Set(testimonial);
        }
        if let Some(testimonial_author) = patch.testimonial_author {
            active.testimonial_author = Set(testimonial_author);
        }
        if let Some(testimonial_role) = patch.testimonial_role {
            active.testimonial_role = Set(testimonial_role);
        }
        if let Some(featured) = patch.featured {
            active.featured = Set(featured);
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update case study")?;

        Ok(Some(CaseStudy::from(model)))
    }

    /// Returns true when a row was actually deleted.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = case_studies::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete case study")?;

        Ok(result.rows_affected > 0)
    }
}
