string_enum!(
    /// How a repaired device goes back to the customer.
    DeliveryType {
        Store => "store",
        Delivery => "delivery",
    }
);

string_enum!(
    TransactionType {
        Income => "income",
        Expense => "expense",
        Withdrawal => "withdrawal",
        Deposit => "deposit",
    }
);

impl TransactionType {
    /// Money entering the till.
    pub fn is_inflow(&self) -> bool {
        matches!(self, TransactionType::Income | TransactionType::Deposit)
    }
}

string_enum!(
    ProductCategory {
        Accessory => "accessory",
        Part => "part",
        Service => "service",
        Other => "other",
    }
);

string_enum!(
    UserRole {
        Admin => "admin",
        Technician => "technician",
        Attendant => "attendant",
    }
);
