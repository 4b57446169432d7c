//! Scope relation entities - The eight join tables declaring what a policy
//! applies to.
//!
//! Five resource-level dimensions (item groups, customer groups, event groups,
//! payment methods, vendors) plus three individual overrides (items, customers,
//! events) that bypass group membership. Each table is keyed by a composite
//! primary key `(policy_id, <dimension>_id)`, so a pair can appear at most once.

/// Join table `policy_item_groups` - policies scoped to item groups
pub mod policy_item_group {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    /// Row linking one policy to one item group
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "policy_item_groups")]
    pub struct Model {
        /// Policy side of the association
        #[sea_orm(primary_key, auto_increment = false)]
        pub policy_id: i64,
        /// Item group side of the association
        #[sea_orm(primary_key, auto_increment = false)]
        pub item_group_id: i64,
    }

    /// Both sides of the join
    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        /// Owning policy
        #[sea_orm(
            belongs_to = "crate::entities::policy::Entity",
            from = "Column::PolicyId",
            to = "crate::entities::policy::Column::Id"
        )]
        Policy,
        /// Referenced item group
        #[sea_orm(
            belongs_to = "crate::entities::item_group::Entity",
            from = "Column::ItemGroupId",
            to = "crate::entities::item_group::Column::Id"
        )]
        ItemGroup,
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Join table `policy_customer_groups` - policies scoped to customer groups
pub mod policy_customer_group {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    /// Row linking one policy to one customer group
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "policy_customer_groups")]
    pub struct Model {
        /// Policy side of the association
        #[sea_orm(primary_key, auto_increment = false)]
        pub policy_id: i64,
        /// Customer group side of the association
        #[sea_orm(primary_key, auto_increment = false)]
        pub customer_group_id: i64,
    }

    /// Both sides of the join
    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        /// Owning policy
        #[sea_orm(
            belongs_to = "crate::entities::policy::Entity",
            from = "Column::PolicyId",
            to = "crate::entities::policy::Column::Id"
        )]
        Policy,
        /// Referenced customer group
        #[sea_orm(
            belongs_to = "crate::entities::customer_group::Entity",
            from = "Column::CustomerGroupId",
            to = "crate::entities::customer_group::Column::Id"
        )]
        CustomerGroup,
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Join table `policy_event_groups` - policies scoped to event groups
pub mod policy_event_group {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    /// Row linking one policy to one event group
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "policy_event_groups")]
    pub struct Model {
        /// Policy side of the association
        #[sea_orm(primary_key, auto_increment = false)]
        pub policy_id: i64,
        /// Event group side of the association
        #[sea_orm(primary_key, auto_increment = false)]
        pub event_group_id: i64,
    }

    /// Both sides of the join
    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        /// Owning policy
        #[sea_orm(
            belongs_to = "crate::entities::policy::Entity",
            from = "Column::PolicyId",
            to = "crate::entities::policy::Column::Id"
        )]
        Policy,
        /// Referenced event group
        #[sea_orm(
            belongs_to = "crate::entities::event_group::Entity",
            from = "Column::EventGroupId",
            to = "crate::entities::event_group::Column::Id"
        )]
        EventGroup,
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Join table `policy_payment_methods` - payment methods a policy allows
pub mod policy_payment_method {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    /// Row linking one policy to one payment method
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "policy_payment_methods")]
    pub struct Model {
        /// Policy side of the association
        #[sea_orm(primary_key, auto_increment = false)]
        pub policy_id: i64,
        /// Payment method side of the association
        #[sea_orm(primary_key, auto_increment = false)]
        pub payment_method_id: i64,
    }

    /// Both sides of the join
    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        /// Owning policy
        #[sea_orm(
            belongs_to = "crate::entities::policy::Entity",
            from = "Column::PolicyId",
            to = "crate::entities::policy::Column::Id"
        )]
        Policy,
        /// Referenced payment method
        #[sea_orm(
            belongs_to = "crate::entities::payment_method::Entity",
            from = "Column::PaymentMethodId",
            to = "crate::entities::payment_method::Column::Id"
        )]
        PaymentMethod,
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Join table `policy_vendors` - vendors a policy allows
pub mod policy_vendor {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    /// Row linking one policy to one vendor
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "policy_vendors")]
    pub struct Model {
        /// Policy side of the association
        #[sea_orm(primary_key, auto_increment = false)]
        pub policy_id: i64,
        /// Vendor side of the association
        #[sea_orm(primary_key, auto_increment = false)]
        pub vendor_id: i64,
    }

    /// Both sides of the join
    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        /// Owning policy
        #[sea_orm(
            belongs_to = "crate::entities::policy::Entity",
            from = "Column::PolicyId",
            to = "crate::entities::policy::Column::Id"
        )]
        Policy,
        /// Referenced vendor
        #[sea_orm(
            belongs_to = "crate::entities::vendor::Entity",
            from = "Column::VendorId",
            to = "crate::entities::vendor::Column::Id"
        )]
        Vendor,
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Join table `policy_items` - individual item overrides
pub mod policy_item {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    /// Row linking one policy directly to one item, bypassing group membership
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "policy_items")]
    pub struct Model {
        /// Policy side of the association
        #[sea_orm(primary_key, auto_increment = false)]
        pub policy_id: i64,
        /// Item side of the association
        #[sea_orm(primary_key, auto_increment = false)]
        pub item_id: i64,
    }

    /// Both sides of the join
    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        /// Owning policy
        #[sea_orm(
            belongs_to = "crate::entities::policy::Entity",
            from = "Column::PolicyId",
            to = "crate::entities::policy::Column::Id"
        )]
        Policy,
        /// Referenced item
        #[sea_orm(
            belongs_to = "crate::entities::item::Entity",
            from = "Column::ItemId",
            to = "crate::entities::item::Column::Id"
        )]
        Item,
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Join table `policy_customers` - individual customer overrides
pub mod policy_customer {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    /// Row linking one policy directly to one customer, bypassing group membership
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "policy_customers")]
    pub struct Model {
        /// Policy side of the association
        #[sea_orm(primary_key, auto_increment = false)]
        pub policy_id: i64,
        /// Customer side of the association
        #[sea_orm(primary_key, auto_increment = false)]
        pub customer_id: i64,
    }

    /// Both sides of the join
    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        /// Owning policy
        #[sea_orm(
            belongs_to = "crate::entities::policy::Entity",
            from = "Column::PolicyId",
            to = "crate::entities::policy::Column::Id"
        )]
        Policy,
        /// Referenced customer
        #[sea_orm(
            belongs_to = "crate::entities::customer::Entity",
            from = "Column::CustomerId",
            to = "crate::entities::customer::Column::Id"
        )]
        Customer,
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Join table `policy_events` - individual event overrides
pub mod policy_event {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    /// Row linking one policy directly to one event, bypassing group membership
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "policy_events")]
    pub struct Model {
        /// Policy side of the association
        #[sea_orm(primary_key, auto_increment = false)]
        pub policy_id: i64,
        /// Event side of the association
        #[sea_orm(primary_key, auto_increment = false)]
        pub event_id: i64,
    }

    /// Both sides of the join
    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        /// Owning policy
        #[sea_orm(
            belongs_to = "crate::entities::policy::Entity",
            from = "Column::PolicyId",
            to = "crate::entities::policy::Column::Id"
        )]
        Policy,
        /// Referenced event
        #[sea_orm(
            belongs_to = "crate::entities::event::Entity",
            from = "Column::EventId",
            to = "crate::entities::event::Column::Id"
        )]
        Event,
    }

    impl ActiveModelBehavior for ActiveModel {}
}
