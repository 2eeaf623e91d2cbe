use crate::domain::money::Money;
use crate::domain::settlement::{Balance, Settlement};
use crate::error::Result;
use rust_decimal::{Decimal, RoundingStrategy};
use std::io::Write;

/// Writes settlements or balances as CSV, amounts to two decimals.
pub struct SettlementWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> SettlementWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_settlements(&mut self, settlements: &[Settlement]) -> Result<()> {
        self.writer.write_record(["from", "to", "amount"])?;
        for settlement in settlements {
            let amount = format_amount(settlement.amount);
            self.writer.write_record([
                settlement.from.as_str(),
                settlement.to.as_str(),
                amount.as_str(),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn write_balances(&mut self, balances: &[Balance]) -> Result<()> {
        self.writer.write_record(["member", "name", "balance"])?;
        for balance in balances {
            let amount = format_amount(balance.amount);
            self.writer.write_record([
                balance.member_id.as_str(),
                balance.name.as_str(),
                amount.as_str(),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

fn format_amount(amount: Money) -> String {
    let rounded = amount
        .value()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    // No "-0.00" for balances that round to nothing.
    let rounded = if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    };
    format!("{rounded:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::member::MemberId;
    use rust_decimal_macros::dec;

    fn written(write: impl FnOnce(&mut SettlementWriter<&mut Vec<u8>>) -> Result<()>) -> String {
        let mut buffer = Vec::new();
        let mut writer = SettlementWriter::new(&mut buffer);
        write(&mut writer).unwrap();
        drop(writer);
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_write_settlements() {
        let settlements = vec![Settlement {
            from_id: MemberId::from("b"),
            from: "Bob".to_string(),
            to_id: MemberId::from("a"),
            to: "Alice".to_string(),
            amount: Money::new(dec!(33.3333333333)),
        }];

        let output = written(|w| w.write_settlements(&settlements));
        assert_eq!(output, "from,to,amount\nBob,Alice,33.33\n");
    }

    #[test]
    fn test_half_cents_round_away_from_zero() {
        assert_eq!(format_amount(Money::new(dec!(0.125))), "0.13");
        assert_eq!(format_amount(Money::new(dec!(10.005))), "10.01");
        assert_eq!(format_amount(Money::new(dec!(-2.345))), "-2.35");
        assert_eq!(format_amount(Money::new(dec!(7.124))), "7.12");
    }

    #[test]
    fn test_write_balances() {
        let balances = vec![
            Balance {
                member_id: MemberId::from("a"),
                name: "Alice".to_string(),
                amount: Money::new(dec!(60)),
            },
            Balance {
                member_id: MemberId::from("b"),
                name: "Bob, Jr.".to_string(),
                amount: Money::new(dec!(-0.0000001)),
            },
        ];

        let output = written(|w| w.write_balances(&balances));
        assert_eq!(
            output,
            "member,name,balance\na,Alice,60.00\nb,\"Bob, Jr.\",0.00\n"
        );
    }
}
