//! Demo account seeding.

use crate::domain::{NewAccount, Password, ProfileFields, Role};
use crate::errors::AppResult;
use crate::infra::AccountRepository;

/// A demo account and its plain-text password.
pub struct SeedAccount {
    pub email: &'static str,
    pub password: &'static str,
    pub surname: &'static str,
    pub name: &'static str,
    pub role: Role,
}

pub const DEMO_ACCOUNTS: [SeedAccount; 3] = [
    SeedAccount {
        email: "admin@example.com",
        password: "admin123",
        surname: "Adminov",
        name: "Admin",
        role: Role::Admin,
    },
    SeedAccount {
        email: "manager@example.com",
        password: "manager123",
        surname: "Managerov",
        name: "Manager",
        role: Role::Manager,
    },
    SeedAccount {
        email: "user@example.com",
        password: "user123",
        surname: "Userov",
        name: "User",
        role: Role::User,
    },
];

/// Insert every demo account whose email is not present yet, active or
/// not. Returns how many rows were created.
pub async fn seed_demo_accounts<R: AccountRepository + ?Sized>(repo: &R) -> AppResult<usize> {
    let mut created = 0;

    for seed in &DEMO_ACCOUNTS {
        if repo.find_by_email(seed.email).await?.is_some() {
            continue;
        }

        let password_hash = Password::new(seed.password)?.into_string();
        let profile = ProfileFields {
            surname: seed.surname.to_string(),
            name: seed.name.to_string(),
            middle_name: None,
        };
        repo.insert(NewAccount::new(seed.email, password_hash, profile).with_role(seed.role))
            .await?;

        tracing::info!(email = seed.email, role = %seed.role, "Demo account created");
        created += 1;
    }

    if created == 0 {
        tracing::info!("Demo accounts already exist");
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MemoryAccountStore;

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let store = MemoryAccountStore::new();

        assert_eq!(seed_demo_accounts(&store).await.unwrap(), 3);
        assert_eq!(seed_demo_accounts(&store).await.unwrap(), 0);
        assert_eq!(store.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_seed_assigns_roles() {
        let store = MemoryAccountStore::new();
        seed_demo_accounts(&store).await.unwrap();

        let admin = store.find_by_email("admin@example.com").await.unwrap().unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert!(Password::from_hash(admin.password_hash.as_str()).verify("admin123"));
    }
}
