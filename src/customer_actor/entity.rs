use crate::actor_framework::Entity;
use crate::domain::{Customer, CustomerCreate};

impl Entity for Customer {
    type Id = String;
    type CreatePayload = CustomerCreate;
    type Action = ();
    type ActionResult = ();

    const KIND: &'static str = "customer";

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create(id: String, payload: CustomerCreate) -> Result<Self, String> {
        Ok(Self {
            id,
            name: payload.name,
            email: payload.email,
            created_at: payload.created_at,
        })
    }

    fn on_create(&mut self) -> Result<(), String> {
        if self.email.is_empty() {
            return Err("Email required".to_string());
        }
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}
