#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use leads_backend::dto::lead_dto::RawLeadRow;
use leads_backend::error::{Error, Result};
use leads_backend::models::lead::{Lead, LeadFields};
use leads_backend::services::lead_service::LeadStore;

#[derive(Default)]
struct Inner {
    state: Mutex<State>,
    fail_writes: AtomicBool,
}

#[derive(Default)]
struct State {
    next_id: i64,
    leads: Vec<Lead>,
}

/// In-memory `LeadStore` double. Clones share the same backing state, so a
/// test can hand one clone to a service and keep another for assertions.
#[derive(Clone, Default)]
pub struct MemoryLeadStore {
    inner: Arc<Inner>,
}

impl MemoryLeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write fail, simulating a persistence outage.
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn leads(&self) -> Vec<Lead> {
        self.inner.state.lock().unwrap().leads.clone()
    }

    pub fn lead(&self, id: i64) -> Option<Lead> {
        self.leads().into_iter().find(|lead| lead.id == id)
    }

    fn check_writable(&self) -> Result<()> {
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Internal("simulated write failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl LeadStore for MemoryLeadStore {
    async fn create(&self, fields: LeadFields) -> Result<Lead> {
        self.check_writable()?;
        if fields.first_name.is_empty() {
            return Err(Error::BadRequest("First name is required".to_string()));
        }
        let mut state = self.inner.state.lock().unwrap();
        state.next_id += 1;
        let now = Utc::now();
        let lead = Lead {
            id: state.next_id,
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email,
            job_title: fields.job_title,
            country_code: fields.country_code,
            company_name: fields.company_name,
            message: fields.message,
            gender: fields.gender,
            created_at: now,
            updated_at: now,
        };
        state.leads.push(lead.clone());
        Ok(lead)
    }

    async fn get(&self, id: i64) -> Result<Option<Lead>> {
        Ok(self.lead(id))
    }

    async fn list(&self) -> Result<Vec<Lead>> {
        Ok(self.leads())
    }

    async fn update(&self, id: i64, fields: LeadFields) -> Result<Lead> {
        self.check_writable()?;
        if fields.first_name.is_empty() {
            return Err(Error::BadRequest("First name is required".to_string()));
        }
        let mut state = self.inner.state.lock().unwrap();
        let lead = state
            .leads
            .iter_mut()
            .find(|lead| lead.id == id)
            .ok_or_else(|| Error::NotFound("Lead not found".to_string()))?;
        lead.first_name = fields.first_name;
        lead.last_name = fields.last_name;
        lead.email = fields.email;
        lead.job_title = fields.job_title;
        lead.country_code = fields.country_code;
        lead.company_name = fields.company_name;
        lead.message = fields.message;
        lead.gender = fields.gender;
        lead.updated_at = Utc::now();
        Ok(lead.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.check_writable()?;
        let mut state = self.inner.state.lock().unwrap();
        let before = state.leads.len();
        state.leads.retain(|lead| lead.id != id);
        if state.leads.len() == before {
            return Err(Error::NotFound("Lead not found".to_string()));
        }
        Ok(())
    }

    async fn find_by_name(&self, first_name: &str, last_name: &str) -> Result<Option<Lead>> {
        Ok(self
            .leads()
            .into_iter()
            .find(|lead| lead.first_name == first_name && lead.last_name == last_name))
    }

    async fn set_message(&self, id: i64, message: &str) -> Result<Lead> {
        self.check_writable()?;
        let mut state = self.inner.state.lock().unwrap();
        let lead = state
            .leads
            .iter_mut()
            .find(|lead| lead.id == id)
            .ok_or_else(|| Error::NotFound("Lead not found".to_string()))?;
        lead.message = message.to_string();
        lead.updated_at = Utc::now();
        Ok(lead.clone())
    }

    async fn set_gender(&self, id: i64, gender: &str) -> Result<Lead> {
        self.check_writable()?;
        let mut state = self.inner.state.lock().unwrap();
        let lead = state
            .leads
            .iter_mut()
            .find(|lead| lead.id == id)
            .ok_or_else(|| Error::NotFound("Lead not found".to_string()))?;
        lead.gender = gender.to_string();
        lead.updated_at = Utc::now();
        Ok(lead.clone())
    }
}

pub fn row(first_name: &str, last_name: &str, company_name: &str) -> RawLeadRow {
    let opt = |v: &str| {
        if v.is_empty() {
            None
        } else {
            Some(v.to_string())
        }
    };
    RawLeadRow {
        first_name: opt(first_name),
        last_name: opt(last_name),
        company_name: opt(company_name),
        ..Default::default()
    }
}

pub fn fields(first_name: &str, last_name: &str, company_name: &str) -> LeadFields {
    LeadFields {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        company_name: company_name.to_string(),
        ..Default::default()
    }
}
