//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod consumption;
pub mod customer;
pub mod customer_group;
pub mod event;
pub mod event_group;
pub mod item;
pub mod item_group;
pub mod payment_method;
pub mod policy;
pub mod scope;
pub mod vendor;

// Re-export specific types to avoid conflicts
pub use consumption::{Entity as Consumption, Model as ConsumptionModel};
pub use customer::{Entity as Customer, Model as CustomerModel};
pub use customer_group::{Entity as CustomerGroup, Model as CustomerGroupModel};
pub use event::{Entity as Event, Model as EventModel};
pub use event_group::{Entity as EventGroup, Model as EventGroupModel};
pub use item::{Entity as Item, Model as ItemModel};
pub use item_group::{Entity as ItemGroup, Model as ItemGroupModel};
pub use payment_method::{Entity as PaymentMethod, Model as PaymentMethodModel};
pub use policy::{Entity as Policy, Model as PolicyModel};
pub use scope::{
    policy_customer, policy_customer_group, policy_event, policy_event_group, policy_item,
    policy_item_group, policy_payment_method, policy_vendor,
};
pub use vendor::{Entity as Vendor, Model as VendorModel};
