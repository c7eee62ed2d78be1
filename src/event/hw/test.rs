use super::{Cache, Op, OpResult, Type};
use crate::event::Family;

#[test]
fn test_cache_config_layout() {
    let cache = Cache::new(Type::Ll, Op::Prefetch, OpResult::Miss);
    assert_eq!(cache.config(), 0x01_02_02);

    let cache = Cache::new(Type::L1d, Op::Read, OpResult::Access);
    assert_eq!(cache.config(), 0);
}

#[test]
fn test_cache_unpack_matrix() {
    let types = [
        Type::L1d,
        Type::L1i,
        Type::Ll,
        Type::Dtlb,
        Type::Itlb,
        Type::Bpu,
        Type::Node,
    ];
    for ty in types {
        for op in [Op::Read, Op::Write, Op::Prefetch] {
            for result in [OpResult::Access, OpResult::Miss] {
                let cache = Cache::new(ty, op, result);
                assert_eq!(Cache::unpack(cache.config()), Some(cache));
            }
        }
    }
}

#[test]
fn test_cache_unpack_rejects_garbage() {
    assert_eq!(Cache::unpack(0x07), None);
    assert_eq!(Cache::unpack(0x03_00), None);
    assert_eq!(Cache::unpack(0x02_00_00), None);
    assert_eq!(Cache::unpack(1 << 24), None);
}

#[test]
fn test_cache_event_family() {
    let event = Cache::new(Type::Dtlb, Op::Write, OpResult::Miss).event();
    assert_eq!(event.family, Family::HardwareCache);
    assert_eq!(event.config, 3 | (1 << 8) | (1 << 16));
}
