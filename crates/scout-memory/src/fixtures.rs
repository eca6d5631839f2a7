//! Sample agent and category documents.
//!
//! All data in this module is hardcoded and fictional. Documents are shaped
//! the way the hosted store returns them, quirks included: some zipcodes are
//! stored as integers, one profile carries only the legacy `specialization`
//! field, and one has no coverage at all.

use serde_json::{json, Value};

use scout_contracts::error::ScoutResult;

use crate::memory::InMemoryBackend;

/// Agent documents keyed by document id.
pub fn agent_documents() -> Value {
    json!({
        "agent-jane": {
            "fullName": "Jane Doe",
            "specializations": ["Buyer Agent", "First-Time Buyers"],
            "states": ["Texas"],
            "counties": ["Travis-Texas"],
            "zipcodes": ["78701", "78702"]
        },
        "agent-sam": {
            "fullName": "Sam Lee",
            "specializations": ["Seller Agent"],
            "states": ["California"],
            "counties": ["Orange-California"],
            "zipcodes": [92602, 92603]
        },
        "agent-maria": {
            "fullName": "Maria Alvarez",
            "specializations": ["Buyer Agent", "Relocation"],
            "states": ["Florida"],
            "counties": ["Miami-Dade-Florida"],
            "zipcodes": ["33101"]
        },
        "agent-tom": {
            "fullName": "Tom Becker",
            "specialization": "Luxury Homes",
            "states": "Washington",
            "counties": ["King-Washington"],
            "zipcodes": [98101]
        },
        "agent-priya": {
            "fullName": "Priya Natarajan",
            "specializations": ["Seller Agent", "Luxury Homes"],
            "states": ["Texas", "California"],
            "counties": ["Harris-Texas", "Los Angeles-California"],
            "zipcodes": ["77002", "90012"]
        },
        "agent-new": {
            "fullName": "Alex Kim"
        }
    })
}

/// The category document.
pub fn category_document() -> Value {
    json!({
        "categories": [
            "Buyer Agent",
            "Seller Agent",
            "Luxury Homes",
            "Relocation",
            "First-Time Buyers"
        ]
    })
}

/// A backend preloaded with every fixture document.
pub fn seeded_backend() -> ScoutResult<InMemoryBackend> {
    let backend = InMemoryBackend::new();
    backend.load_agent_documents(agent_documents())?;
    backend.load_category_document(category_document())?;
    Ok(backend)
}
