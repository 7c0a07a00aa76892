// src/domain/finance.rs
//
// Contas de uma reserva: total, pago, pendente, IVA e o split da comissão do
// link de pagamento. Funções puras, sem estado.

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    models::booking::{BookingSource, Charge, Payment},
};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Financials {
    /// Preço base + consumos
    pub total: Decimal,
    pub paid: Decimal,
    /// Negativo quando o hóspede pagou a mais
    pub pending: Decimal,
}

impl Financials {
    pub fn has_debt(&self) -> bool {
        self.pending > Decimal::ZERO
    }
}

/// `total = base + Σconsumos`, `paid = Σpagamentos`, `pending = total − paid`
pub fn calculate_financials(base_price: Decimal, charges: &[Charge], payments: &[Payment]) -> Financials {
    let total = base_price + charges.iter().map(|c| c.price).sum::<Decimal>();
    let paid = payments.iter().map(|p| p.amount).sum::<Decimal>();

    Financials { total, paid, pending: total - paid }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdown {
    pub base: Decimal,
    pub tax: Decimal,
}

/// Separa o IVA de um total que já o inclui: `base = total / (1 + r/100)`.
pub fn calculate_tax(total: Decimal, rate_percent: Decimal) -> TaxBreakdown {
    if rate_percent <= Decimal::ZERO {
        return TaxBreakdown { base: total, tax: Decimal::ZERO };
    }

    let base = (total / (Decimal::ONE + rate_percent / HUNDRED)).round_dp(2);
    TaxBreakdown { base, tax: total - base }
}

/// Portão do check-out: com saldo pendente só sai com confirmação explícita.
pub fn check_out_gate(financials: &Financials, force: bool) -> Result<(), AppError> {
    if financials.has_debt() && !force {
        return Err(AppError::PendingBalance { pending: financials.pending });
    }
    Ok(())
}

// ---
// Link de pagamento (Wompi)
// ---

/// Tarifa do processador: `(valor × variável% + fixa) × (1 + IVA%)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessorFees {
    pub variable_percent: Decimal,
    pub fixed: Decimal,
    pub vat_percent: Decimal,
}

impl Default for ProcessorFees {
    fn default() -> Self {
        Self {
            variable_percent: Decimal::new(265, 2), // 2,65%
            fixed: Decimal::from(700),
            vat_percent: Decimal::from(19),
        }
    }
}

impl ProcessorFees {
    pub fn fee_for(&self, amount: Decimal) -> Decimal {
        ((amount * self.variable_percent / HUNDRED + self.fixed) * (Decimal::ONE + self.vat_percent / HUNDRED)).round_dp(2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentQuote {
    pub amount_today: Decimal,
    pub commission: Decimal,
    pub processor_fee: Decimal,
    pub net_to_hotel: Decimal,
}

/// Comissão da plataforma: zero para reservas diretas; senão `rate%` do valor
/// TOTAL do contrato, limitada ao que se cobra hoje.
pub fn quote_payment_link(
    source: BookingSource,
    contract_total: Decimal,
    amount_today: Decimal,
    commission_rate: Decimal,
    fees: &ProcessorFees,
) -> Result<PaymentQuote, AppError> {
    if amount_today <= Decimal::ZERO {
        return Err(AppError::InvalidAmount);
    }

    let commission = match source {
        BookingSource::Direct => Decimal::ZERO,
        _ => (contract_total * commission_rate / HUNDRED).round_dp(2).min(amount_today),
    };
    let processor_fee = fees.fee_for(amount_today);
    let net_to_hotel = (amount_today - commission - processor_fee).max(Decimal::ZERO);

    Ok(PaymentQuote { amount_today, commission, processor_fee, net_to_hotel })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking::PaymentMethod;
    use chrono::Utc;
    use uuid::Uuid;

    fn charge(price: i64) -> Charge {
        Charge {
            id: Uuid::new_v4(),
            hotel_id: Uuid::nil(),
            booking_id: Uuid::nil(),
            description: "Minibar".into(),
            price: Decimal::from(price),
            created_at: Utc::now(),
        }
    }

    fn payment(amount: i64) -> Payment {
        Payment {
            id: Uuid::new_v4(),
            hotel_id: Uuid::nil(),
            booking_id: Uuid::nil(),
            amount: Decimal::from(amount),
            method: PaymentMethod::Cash,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn pending_is_total_plus_charges_minus_payments() {
        let f = calculate_financials(Decimal::from(100000), &[charge(20000)], &[payment(50000)]);
        assert_eq!(f.total, Decimal::from(120000));
        assert_eq!(f.paid, Decimal::from(50000));
        assert_eq!(f.pending, Decimal::from(70000));
    }

    #[test]
    fn overpayment_shows_as_negative_pending_without_debt() {
        let f = calculate_financials(Decimal::from(100000), &[], &[payment(120000)]);
        assert_eq!(f.pending, Decimal::from(-20000));
        assert!(!f.has_debt());
    }

    #[test]
    fn tax_is_split_from_an_inclusive_total() {
        let t = calculate_tax(Decimal::from(119000), Decimal::from(19));
        assert_eq!(t.base, Decimal::from(100000));
        assert_eq!(t.tax, Decimal::from(19000));

        let zero = calculate_tax(Decimal::from(50000), Decimal::ZERO);
        assert_eq!(zero.base, Decimal::from(50000));
        assert_eq!(zero.tax, Decimal::ZERO);
    }

    #[test]
    fn gate_blocks_debt_unless_forced() {
        let f = calculate_financials(Decimal::from(200000), &[], &[payment(100000)]);
        match check_out_gate(&f, false) {
            Err(AppError::PendingBalance { pending }) => assert_eq!(pending, Decimal::from(100000)),
            other => panic!("esperava PendingBalance, veio {:?}", other),
        }
        assert!(check_out_gate(&f, true).is_ok());

        let settled = calculate_financials(Decimal::from(200000), &[], &[payment(200000)]);
        assert!(check_out_gate(&settled, false).is_ok());
    }

    #[test]
    fn direct_bookings_pay_no_commission() {
        let q = quote_payment_link(
            BookingSource::Direct,
            Decimal::from(1_000_000),
            Decimal::from(300_000),
            Decimal::from(15),
            &ProcessorFees::default(),
        )
        .unwrap();

        assert_eq!(q.commission, Decimal::ZERO);
        assert_eq!(q.net_to_hotel, q.amount_today - q.processor_fee);
    }

    #[test]
    fn commission_is_on_contract_total_capped_at_amount_today() {
        let fees = ProcessorFees { variable_percent: Decimal::ZERO, fixed: Decimal::ZERO, vat_percent: Decimal::ZERO };

        let q = quote_payment_link(BookingSource::Booking, Decimal::from(1_000_000), Decimal::from(300_000), Decimal::from(15), &fees).unwrap();
        assert_eq!(q.commission, Decimal::from(150_000));
        assert_eq!(q.net_to_hotel, Decimal::from(150_000));

        let capped = quote_payment_link(BookingSource::Airbnb, Decimal::from(1_000_000), Decimal::from(100_000), Decimal::from(15), &fees).unwrap();
        assert_eq!(capped.commission, Decimal::from(100_000));
        assert_eq!(capped.net_to_hotel, Decimal::ZERO);
    }

    #[test]
    fn processor_fee_includes_vat() {
        // (100000 × 2,65% + 700) × 1,19 = 3986,50
        assert_eq!(ProcessorFees::default().fee_for(Decimal::from(100_000)), Decimal::new(398650, 2));
    }

    #[test]
    fn quote_rejects_non_positive_amounts() {
        let r = quote_payment_link(BookingSource::Direct, Decimal::from(1), Decimal::ZERO, Decimal::ZERO, &ProcessorFees::default());
        assert!(matches!(r, Err(AppError::InvalidAmount)));
    }
}
