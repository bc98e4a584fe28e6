//! Canonical resource paths for the LoomDB HTTP API.
//!
//! Every request the SDK issues is addressed through one of these pure
//! functions, so path generation is deterministic and testable in
//! isolation. No URL-encoding happens here beyond what the transport layer
//! performs; application, environment, entity-kind and token names
//! containing path separators are a caller error, not sanitized.

use crate::types::TenantScope;

/// Path to an entity-kind collection: `/apps/{app}/{env}/{kind}`.
pub fn entities(app: &str, env: &str, kind: &str) -> String {
    format!("/apps/{}/{}/{}", app, env, kind)
}

/// Path to a single entity: `/apps/{app}/{env}/{kind}/{id}`.
///
/// Always the collection path plus `/{id}` - callers may rely on the
/// prefix relationship.
pub fn entity(app: &str, env: &str, kind: &str, id: &str) -> String {
    format!("{}/{}", entities(app, env, kind), id)
}

/// Path to an application: `/apps/{app}`.
pub fn application(app: &str) -> String {
    format!("/apps/{}", app)
}

/// Path to an environment within an application: `/apps/{app}/{env}`.
pub fn environment(app: &str, env: &str) -> String {
    format!("/apps/{}/{}", app, env)
}

/// Path for application-scoped token creation: `/tokens/{app}`.
pub fn application_tokens(app: &str) -> String {
    format!("/tokens/{}", app)
}

/// Path for revoking an application-scoped token: `/tokens/{app}/{token}`.
pub fn application_token(app: &str, token: &str) -> String {
    format!("/tokens/{}/{}", app, token)
}

/// Path for environment-scoped token creation: `/tokens/{app}/{env}`.
pub fn environment_tokens(app: &str, env: &str) -> String {
    format!("/tokens/{}/{}", app, env)
}

/// Path for revoking an environment-scoped token:
/// `/tokens/{app}/{env}/{token}`.
pub fn environment_token(app: &str, env: &str, token: &str) -> String {
    format!("/tokens/{}/{}/{}", app, env, token)
}

/// Path for a knowledge-base inquiry: `/knowledgebase/{app}/{env}`.
pub fn knowledgebase(app: &str, env: &str) -> String {
    format!("/knowledgebase/{}/{}", app, env)
}

/// Path for the change socket: `/ws/{app}` or `/ws/{app}/{env}`.
pub fn socket(scope: &TenantScope) -> String {
    match scope.environment_name() {
        Some(env) => format!("/ws/{}/{}", scope.application_name(), env),
        None => format!("/ws/{}", scope.application_name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_templates() {
        assert_eq!(entities("shop", "prod", "orders"), "/apps/shop/prod/orders");
        assert_eq!(
            entity("shop", "prod", "orders", "o1"),
            "/apps/shop/prod/orders/o1"
        );
    }

    #[test]
    fn test_admin_templates() {
        assert_eq!(application("shop"), "/apps/shop");
        assert_eq!(environment("shop", "prod"), "/apps/shop/prod");
        assert_eq!(application_tokens("shop"), "/tokens/shop");
        assert_eq!(application_token("shop", "llt_1"), "/tokens/shop/llt_1");
        assert_eq!(environment_tokens("shop", "prod"), "/tokens/shop/prod");
        assert_eq!(
            environment_token("shop", "prod", "llt_2"),
            "/tokens/shop/prod/llt_2"
        );
        assert_eq!(knowledgebase("shop", "prod"), "/knowledgebase/shop/prod");
    }

    #[test]
    fn test_socket_with_and_without_environment() {
        assert_eq!(socket(&TenantScope::application("shop")), "/ws/shop");
        assert_eq!(
            socket(&TenantScope::environment("shop", "prod")),
            "/ws/shop/prod"
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        // Names are caller-validated; the property holds for anything
        // without a path separator.
        fn name() -> impl Strategy<Value = String> {
            "[A-Za-z0-9_-]{1,16}"
        }

        proptest! {
            #[test]
            fn collection_is_strict_prefix_of_entity(
                app in name(),
                env in name(),
                kind in name(),
                id in name(),
            ) {
                let collection = entities(&app, &env, &kind);
                let single = entity(&app, &env, &kind, &id);
                prop_assert_eq!(&single[..collection.len()], collection.as_str());
                prop_assert_eq!(&single[collection.len()..], format!("/{}", id));
            }
        }
    }
}
