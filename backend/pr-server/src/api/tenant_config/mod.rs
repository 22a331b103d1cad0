pub mod tenant_config;
pub mod tenant_config_query;
pub mod tenant_config_response;
