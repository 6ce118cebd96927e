use serde::Serialize;

use super::validation::FieldError;
use crate::db::{CaseStudy, ContactMessage, SiteSetting};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            details: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            details: None,
        }
    }

    pub fn error_with_details(message: impl Into<String>, details: Vec<FieldError>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            details: Some(details),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CaseStudyDto {
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

impl From<CaseStudy> for CaseStudyDto {
    fn from(cs: CaseStudy) -> Self {
        Self {
            id: cs.id,
            title: cs.title,
            slug: cs.slug,
            excerpt: cs.excerpt,
            description: cs.description,
            cover_image: cs.cover_image,
            client_name: cs.client_name,
            client_industry: cs.client_industry,
            duration: cs.duration,
            services: cs.services,
            challenge: cs.challenge,
            solution: cs.solution,
            result: cs.result,
            images: cs.images,
            technologies: cs.technologies,
            testimonial: cs.testimonial,
            testimonial_author: cs.testimonial_author,
            testimonial_role: cs.testimonial_role,
            featured: cs.featured,
            publish_date: cs.publish_date,
            created_at: cs.created_at,
            updated_at: cs.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContactMessageDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub read: bool,
    pub created_at: String,
}

impl From<ContactMessage> for ContactMessageDto {
    fn from(m: ContactMessage) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            subject: m.subject,
            message: m.message,
            read: m.read,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SiteSettingDto {
    pub id: i32,
    pub key: String,
    pub value: Option<String>,
    pub description: Option<String>,
    pub category: String,
    #[serde(rename = "type")]
    pub setting_type: String,
    pub updated_at: String,
}

impl From<SiteSetting> for SiteSettingDto {
    fn from(s: SiteSetting) -> Self {
        Self {
            id: s.id,
            key: s.key,
            value: s.value,
            description: s.description,
            category: s.category,
            setting_type: s.setting_type,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub version: String,
    pub uptime: u64,
    pub database: String,
}
