use proptest::prelude::*;
use wirebuf_core::{Buffer, BufferOverflow, Scalar};

fn roundtrip<T: Scalar>(value: T) -> (T, T) {
    let mut buf = Buffer::new();
    buf.append(value);
    assert_eq!(buf.size(), T::WIDTH);
    let read = buf.read::<T>(0).expect("read after append");
    let consumed = buf.consume::<T>().expect("consume after append");
    assert!(buf.is_empty());
    (read, consumed)
}

/// `consume::<T>()` must behave exactly like `read::<T>(0)` followed by
/// `discard(T::WIDTH)`, on success and on overflow alike.
fn consume_matches_read<T: Scalar>(bytes: &[u8]) -> Result<(), TestCaseError> {
    let mut consumed = Buffer::from(bytes);
    let mut discarded = Buffer::from(bytes);

    let via_consume = consumed.consume::<T>();
    let via_read = discarded
        .read::<T>(0)
        .and_then(|value| discarded.discard(T::WIDTH).map(|()| value));

    match (via_consume, via_read) {
        // Compare wire images so NaN payloads count as equal.
        (Ok(a), Ok(b)) => {
            let (mut left, mut right) = (Buffer::new(), Buffer::new());
            left.append(a);
            right.append(b);
            prop_assert_eq!(left, right);
        }
        (Err(a), Err(b)) => prop_assert_eq!(a, b),
        (a, b) => prop_assert!(
            false,
            "{}: consume ok={} read ok={}",
            T::NAME,
            a.is_ok(),
            b.is_ok()
        ),
    }
    prop_assert_eq!(consumed, discarded);
    Ok(())
}

proptest! {
    #[test]
    fn integers_roundtrip(a in any::<i8>(), b in any::<u16>(), c in any::<i32>(), d in any::<u64>(), e in any::<i64>()) {
        prop_assert_eq!(roundtrip(a), (a, a));
        prop_assert_eq!(roundtrip(b), (b, b));
        prop_assert_eq!(roundtrip(c), (c, c));
        prop_assert_eq!(roundtrip(d), (d, d));
        prop_assert_eq!(roundtrip(e), (e, e));
    }

    #[test]
    fn floats_roundtrip_bit_for_bit(x in any::<u32>(), y in any::<u64>()) {
        let f = f32::from_bits(x);
        let (read, consumed) = roundtrip(f);
        prop_assert_eq!(read.to_bits(), x);
        prop_assert_eq!(consumed.to_bits(), x);

        let g = f64::from_bits(y);
        let (read, consumed) = roundtrip(g);
        prop_assert_eq!(read.to_bits(), y);
        prop_assert_eq!(consumed.to_bits(), y);
    }

    #[test]
    fn encoding_matches_to_be_bytes(value in any::<u64>(), small in any::<i16>()) {
        let mut buf = Buffer::new();
        buf.append_u64(value);
        buf.append_i16(small);
        let mut expected = value.to_be_bytes().to_vec();
        expected.extend_from_slice(&small.to_be_bytes());
        prop_assert_eq!(buf.as_slice(), expected.as_slice());
    }

    #[test]
    fn consume_equals_read_then_discard(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        consume_matches_read::<bool>(&bytes)?;
        consume_matches_read::<u8>(&bytes)?;
        consume_matches_read::<i16>(&bytes)?;
        consume_matches_read::<u32>(&bytes)?;
        consume_matches_read::<f32>(&bytes)?;
        consume_matches_read::<i64>(&bytes)?;
        consume_matches_read::<f64>(&bytes)?;
    }

    #[test]
    fn read_i32_bounds(bytes in proptest::collection::vec(any::<u8>(), 0..32), offset in 0usize..40) {
        let buf = Buffer::from(bytes);
        let fits = offset + 4 <= buf.size();
        prop_assert_eq!(buf.read_i32(offset).is_ok(), fits);
    }

    #[test]
    fn merge_concatenates(a in proptest::collection::vec(any::<u8>(), 0..32), b in proptest::collection::vec(any::<u8>(), 0..32)) {
        let mut left = Buffer::from(a.clone());
        let right = Buffer::from(b.clone());
        left.merge(&right);

        let mut expected = a;
        expected.extend_from_slice(&b);
        prop_assert_eq!(left.as_slice(), expected.as_slice());
        prop_assert_eq!(right.as_slice(), b.as_slice());
    }

    #[test]
    fn shift_removes_exactly_prefix(bytes in proptest::collection::vec(any::<u8>(), 0..32), n in 0usize..40) {
        let mut buf = Buffer::from(bytes.clone());
        match buf.shift(n) {
            Ok(head) => {
                prop_assert_eq!(head.as_slice(), &bytes[..n]);
                prop_assert_eq!(buf.as_slice(), &bytes[n..]);
            }
            Err(BufferOverflow) => {
                prop_assert!(n > bytes.len());
                prop_assert_eq!(buf.as_slice(), bytes.as_slice());
            }
        }
    }
}

#[test]
fn bool_roundtrip() {
    assert_eq!(roundtrip(true), (true, true));
    assert_eq!(roundtrip(false), (false, false));
}

#[test]
fn extreme_values_roundtrip() {
    assert_eq!(roundtrip(i8::MIN), (i8::MIN, i8::MIN));
    assert_eq!(roundtrip(u8::MAX), (u8::MAX, u8::MAX));
    assert_eq!(roundtrip(i16::MIN), (i16::MIN, i16::MIN));
    assert_eq!(roundtrip(u32::MAX), (u32::MAX, u32::MAX));
    assert_eq!(roundtrip(i64::MIN), (i64::MIN, i64::MIN));
    assert_eq!(roundtrip(i64::MAX), (i64::MAX, i64::MAX));
    assert_eq!(roundtrip(u64::MAX), (u64::MAX, u64::MAX));
}

#[test]
fn signed_64_bit_values_are_not_truncated() {
    let mut buf = Buffer::new();
    buf.append_i64(-0x0123_4567_89AB_CDEF);
    assert_eq!(
        buf.as_slice(),
        &[0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54, 0x32, 0x11]
    );
    assert_eq!(buf.consume_i64().unwrap(), -0x0123_4567_89AB_CDEF);
}

#[test]
fn positional_reads_at_offsets() {
    let mut buf = Buffer::new();
    buf.append_u8(0xAA);
    buf.append_u16(0xBEEF);
    buf.append_f32(1.5);
    buf.append_bool(true);
    buf.append_string("hi");

    assert_eq!(buf.read_u8(0).unwrap(), 0xAA);
    assert_eq!(buf.read_u16(1).unwrap(), 0xBEEF);
    assert_eq!(buf.read_f32(3).unwrap(), 1.5);
    assert!(buf.read_bool(7).unwrap());
    assert_eq!(buf.read_string(2, 8).unwrap().as_ref(), b"hi");
    assert_eq!(buf.size(), 10);
}

#[test]
fn sequential_consumption() {
    let mut buf = Buffer::new();
    buf.append_i16(-300);
    buf.append_u32(70_000);
    buf.append_f64(-0.125);
    buf.append_i8(-128);

    assert_eq!(buf.consume_i16().unwrap(), -300);
    assert_eq!(buf.consume_u32().unwrap(), 70_000);
    assert_eq!(buf.consume_f64().unwrap(), -0.125);
    assert_eq!(buf.consume_i8().unwrap(), -128);
    assert_eq!(buf.consume_u8(), Err(BufferOverflow));
}

#[test]
fn flush_twice_returns_empty_second_time() {
    let mut buf = Buffer::from(b"payload");
    assert_eq!(buf.flush().as_ref(), b"payload");
    assert_eq!(buf.size(), 0);
    assert!(buf.flush().is_empty());
}
