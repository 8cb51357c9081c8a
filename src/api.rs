pub mod clock;
pub mod consumption;
pub mod records;
pub mod tariff;

pub use self::{
    clock::{Clock, FixedClock, SystemClock},
    consumption::{ConsumptionLog, ConsumptionRecord},
    records::Records,
    tariff::{Tariff, TariffAgreement, TariffCatalog, TariffId, TariffValidity},
};
