use super::Dataset;
use crate::error::Result;
use crate::notify::{Recipient, RecipientDirectory};
use crate::store::Role;

impl RecipientDirectory for Dataset {
    fn users_at(&self, locations: &[String], roles: &[Role]) -> Result<Vec<Recipient>> {
        Ok(self
            .users
            .iter()
            .filter(|u| locations.contains(&u.location_id) && roles.contains(&u.role))
            .map(|u| Recipient {
                user_id: u.id.clone(),
                name: u.name.clone(),
                email: u.email.clone().filter(|e| !e.trim().is_empty()),
            })
            .collect())
    }
}
