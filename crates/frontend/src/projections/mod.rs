pub mod p910_profitability;
