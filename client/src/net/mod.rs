//! Networking modules for the hosted auth and data services.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` and `assessments` define the interfaces views consume,
//! `supabase` speaks to the hosted service, `memory` is a process-local
//! backend, and `types`/`error` define the shared schema.

pub mod assessments;
pub mod error;
pub mod memory;
pub mod session;
pub mod supabase;
pub mod types;

use std::sync::Arc;

use self::assessments::AssessmentRepository;
use self::session::SessionStore;

/// Backend handles provided to views through Leptos context.
#[derive(Clone)]
pub struct Services {
    pub sessions: Arc<dyn SessionStore>,
    pub assessments: Arc<dyn AssessmentRepository>,
}

impl Services {
    /// Use one backend for both auth and data.
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: SessionStore + AssessmentRepository + 'static,
    {
        Self { sessions: backend.clone(), assessments: backend }
    }
}
