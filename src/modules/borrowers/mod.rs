pub mod models;
pub mod routes;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{routing::get, Router};
use libris_kernel::{InitCtx, Module};
use libris_store::MemoryStore;

use service::BorrowerService;

/// Borrowers module: registration CRUD.
pub struct BorrowersModule {
    service: Arc<BorrowerService>,
}

impl BorrowersModule {
    pub fn new(service: Arc<BorrowerService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Module for BorrowersModule {
    fn name(&self) -> &'static str {
        "borrowers"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "borrowers module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route(
                "/",
                get(routes::list_borrowers).post(routes::create_borrower),
            )
            .route(
                "/{borrower_id}",
                get(routes::get_borrower)
                    .put(routes::update_borrower)
                    .delete(routes::delete_borrower),
            )
            .with_state(self.service.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(serde_json::json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List borrowers",
                        "tags": ["Borrowers"],
                        "responses": {
                            "200": {
                                "description": "List of borrowers",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/BorrowerListResponse"
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Register a borrower",
                        "tags": ["Borrowers"],
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "$ref": "#/components/schemas/BorrowerInput"
                                    }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Registered borrower",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/Borrower"
                                        }
                                    }
                                }
                            },
                            "400": {
                                "description": "Validation error",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/{borrower_id}": {
                    "get": {
                        "summary": "Get a borrower by id",
                        "tags": ["Borrowers"],
                        "parameters": [
                            {
                                "name": "borrower_id",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "integer", "format": "int64" }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "The borrower",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/BorrowerResponse"
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "Borrower not found",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "put": {
                        "summary": "Update a borrower",
                        "tags": ["Borrowers"],
                        "parameters": [
                            {
                                "name": "borrower_id",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "integer", "format": "int64" }
                            }
                        ],
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "$ref": "#/components/schemas/BorrowerInput"
                                    }
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "Updated borrower",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/BorrowerResponse"
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "Borrower not found",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "delete": {
                        "summary": "Delete a borrower",
                        "tags": ["Borrowers"],
                        "parameters": [
                            {
                                "name": "borrower_id",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "integer", "format": "int64" }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "Borrower deleted; held books are detached",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/BorrowerResponse"
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "Borrower not found",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Borrower": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "integer",
                                "format": "int64",
                                "description": "Unique identifier for the borrower"
                            },
                            "name": {
                                "type": "string",
                                "description": "Full name, unique across all borrowers"
                            },
                            "email": {
                                "type": "string",
                                "format": "email",
                                "description": "Email address, unique across all borrowers"
                            }
                        },
                        "required": ["id", "name", "email"]
                    },
                    "BorrowerInput": {
                        "type": "object",
                        "properties": {
                            "name": {
                                "type": "string",
                                "description": "Full name of the borrower"
                            },
                            "email": {
                                "type": "string",
                                "format": "email",
                                "description": "Email address of the borrower"
                            }
                        },
                        "required": ["name", "email"]
                    },
                    "BorrowerResponse": {
                        "type": "object",
                        "properties": {
                            "status": { "type": "string" },
                            "message": { "type": "string" },
                            "data": {
                                "$ref": "#/components/schemas/Borrower",
                                "nullable": true
                            }
                        },
                        "required": ["status", "message"]
                    },
                    "BorrowerListResponse": {
                        "type": "object",
                        "properties": {
                            "status": { "type": "string" },
                            "message": { "type": "string" },
                            "data": {
                                "type": "array",
                                "items": {
                                    "$ref": "#/components/schemas/Borrower"
                                }
                            }
                        },
                        "required": ["status", "message"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "borrowers module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "borrowers module stopped");
        Ok(())
    }
}

/// Create a new instance of the borrowers module
pub fn create_module(store: Arc<MemoryStore>) -> Arc<dyn Module> {
    let service = Arc::new(BorrowerService::new(store));
    Arc::new(BorrowersModule::new(service))
}
