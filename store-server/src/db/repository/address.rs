//! Address Repository

use super::{BaseRepository, RepoError, RepoResult};
use chrono::Utc;
use shared::models::{Address, AddressCreate, AddressUpdate, validate_pincode};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const ADDRESS_TABLE: &str = "address";

const ADDRESS_FIELDS: &str = "<string>id AS id, user_id, full_name, phone, line1, line2, \
     city, state, pincode, is_default, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct AddressRepository {
    base: BaseRepository,
}

impl AddressRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All addresses of one user, default entry first
    pub async fn find_by_user(&self, user_id: &str) -> RepoResult<Vec<Address>> {
        let addresses: Vec<Address> = self
            .base
            .db()
            .query(format!(
                "SELECT {ADDRESS_FIELDS} FROM address WHERE user_id = $user \
                 ORDER BY is_default DESC, created_at DESC"
            ))
            .bind(("user", user_id.to_string()))
            .await?
            .take(0)?;
        Ok(addresses)
    }

    /// Find address by record id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Address>> {
        let record_id: RecordId = id
            .parse()
            .map_err(|_| RepoError::NotFound(format!("Invalid address ID format: {}", id)))?;
        let mut result = self
            .base
            .db()
            .query(format!("SELECT {ADDRESS_FIELDS} FROM address WHERE id = $id"))
            .bind(("id", record_id))
            .await?;
        let addresses: Vec<Address> = result.take(0)?;
        Ok(addresses.into_iter().next())
    }

    /// Create a new address book entry
    pub async fn create(&self, data: AddressCreate) -> RepoResult<Address> {
        // First entry for a user becomes the default automatically
        let is_default = data.is_default || self.find_by_user(&data.user_id).await?.is_empty();
        if is_default {
            self.clear_default(&data.user_id).await?;
        }

        let now = Utc::now();
        let address = Address {
            id: None,
            user_id: data.user_id,
            full_name: data.full_name,
            phone: data.phone,
            line1: data.line1,
            line2: data.line2,
            city: data.city,
            state: data.state,
            pincode: data.pincode,
            is_default,
            created_at: now,
            updated_at: now,
        };

        let key = uuid::Uuid::new_v4().simple().to_string();
        let record_id = RecordId::from_table_key(ADDRESS_TABLE, key);
        self.base
            .db()
            .query("CREATE $id CONTENT $data RETURN NONE")
            .bind(("id", record_id.clone()))
            .bind(("data", address))
            .await?
            .check()?;

        self.find_by_id(&record_id.to_string())
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create address".to_string()))
    }

    /// Update address fields
    pub async fn update(&self, id: &str, data: AddressUpdate) -> RepoResult<Address> {
        let mut existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Address {} not found", id)))?;

        if let Some(full_name) = data.full_name {
            existing.full_name = full_name;
        }
        if let Some(phone) = data.phone {
            existing.phone = phone;
        }
        if let Some(line1) = data.line1 {
            existing.line1 = line1;
        }
        if data.line2.is_some() {
            existing.line2 = data.line2;
        }
        if let Some(city) = data.city {
            existing.city = city;
        }
        if let Some(state) = data.state {
            existing.state = state;
        }
        if let Some(pincode) = data.pincode {
            validate_pincode(&pincode)
                .map_err(|_| RepoError::Validation(format!("Invalid PIN code: {}", pincode)))?;
            existing.pincode = pincode;
        }
        existing.updated_at = Utc::now();

        let record_id: RecordId = id
            .parse()
            .map_err(|_| RepoError::NotFound(format!("Invalid address ID format: {}", id)))?;
        existing.id = None;
        self.base
            .db()
            .query("UPDATE $id CONTENT $data RETURN NONE")
            .bind(("id", record_id))
            .bind(("data", existing))
            .await?
            .check()?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Address {} not found", id)))
    }

    /// Mark one address as the user's default, clearing the previous one
    pub async fn set_default(&self, user_id: &str, id: &str) -> RepoResult<Address> {
        let address = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Address {} not found", id)))?;
        if address.user_id != user_id {
            return Err(RepoError::NotFound(format!("Address {} not found", id)));
        }

        self.clear_default(user_id).await?;

        let record_id: RecordId = id
            .parse()
            .map_err(|_| RepoError::NotFound(format!("Invalid address ID format: {}", id)))?;
        self.base
            .db()
            .query("UPDATE $id SET is_default = true, updated_at = $now RETURN NONE")
            .bind(("id", record_id))
            .bind(("now", Utc::now()))
            .await?
            .check()?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Address {} not found", id)))
    }

    /// Hard delete an address
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        if self.find_by_id(id).await?.is_none() {
            return Ok(false);
        }
        let record_id: RecordId = id
            .parse()
            .map_err(|_| RepoError::NotFound(format!("Invalid address ID format: {}", id)))?;
        self.base
            .db()
            .query("DELETE $id")
            .bind(("id", record_id))
            .await?
            .check()?;
        Ok(true)
    }

    async fn clear_default(&self, user_id: &str) -> RepoResult<()> {
        self.base
            .db()
            .query(
                "UPDATE address SET is_default = false, updated_at = $now \
                 WHERE user_id = $user AND is_default = true RETURN NONE",
            )
            .bind(("now", Utc::now()))
            .bind(("user", user_id.to_string()))
            .await?
            .check()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    fn payload(user: &str, city: &str, is_default: bool) -> AddressCreate {
        AddressCreate {
            user_id: user.to_string(),
            full_name: "Asha Verma".to_string(),
            phone: "9876543210".to_string(),
            line1: "12 MG Road".to_string(),
            line2: None,
            city: city.to_string(),
            state: "Karnataka".to_string(),
            pincode: "560001".to_string(),
            is_default,
        }
    }

    #[tokio::test]
    async fn test_first_address_becomes_default() {
        let service = DbService::memory().await.unwrap();
        let repo = AddressRepository::new(service.db);

        let first = repo.create(payload("user_1", "Bengaluru", false)).await.unwrap();
        assert!(first.is_default);

        let second = repo.create(payload("user_1", "Mysuru", false)).await.unwrap();
        assert!(!second.is_default);
    }

    #[tokio::test]
    async fn test_set_default_clears_previous() {
        let service = DbService::memory().await.unwrap();
        let repo = AddressRepository::new(service.db);

        let first = repo.create(payload("user_1", "Bengaluru", true)).await.unwrap();
        let second = repo.create(payload("user_1", "Mysuru", false)).await.unwrap();

        let promoted = repo
            .set_default("user_1", second.id.as_deref().unwrap())
            .await
            .unwrap();
        assert!(promoted.is_default);

        let demoted = repo
            .find_by_id(first.id.as_deref().unwrap())
            .await
            .unwrap()
            .unwrap();
        assert!(!demoted.is_default);

        // Only one default at a time
        let all = repo.find_by_user("user_1").await.unwrap();
        assert_eq!(all.iter().filter(|a| a.is_default).count(), 1);
        assert_eq!(all[0].city, "Mysuru");
    }

    #[tokio::test]
    async fn test_set_default_scoped_to_owner() {
        let service = DbService::memory().await.unwrap();
        let repo = AddressRepository::new(service.db);

        let address = repo.create(payload("user_1", "Bengaluru", true)).await.unwrap();
        let err = repo
            .set_default("user_2", address.id.as_deref().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_rejects_bad_pincode() {
        let service = DbService::memory().await.unwrap();
        let repo = AddressRepository::new(service.db);

        let address = repo.create(payload("user_1", "Bengaluru", true)).await.unwrap();
        let err = repo
            .update(
                address.id.as_deref().unwrap(),
                AddressUpdate {
                    full_name: None,
                    phone: None,
                    line1: None,
                    line2: None,
                    city: None,
                    state: None,
                    pincode: Some("56".to_string()),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete() {
        let service = DbService::memory().await.unwrap();
        let repo = AddressRepository::new(service.db);

        let address = repo.create(payload("user_1", "Bengaluru", true)).await.unwrap();
        let id = address.id.unwrap();
        assert!(repo.delete(&id).await.unwrap());
        assert!(!repo.delete(&id).await.unwrap());
        assert!(repo.find_by_id(&id).await.unwrap().is_none());
    }
}
