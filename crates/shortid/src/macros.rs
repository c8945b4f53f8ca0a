///
/// field_key
///
/// Declare a `FieldKey` marker type.
///
/// ```ignore
/// shortid::field_key!(pub DemoId => "id");
/// ```
///

#[macro_export]
macro_rules! field_key {
    ($(#[$meta:meta])* $vis:vis $key:ident => $name:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
        $vis struct $key;

        impl $crate::traits::FieldKey for $key {
            const NAME: &'static str = $name;
        }
    };
}

///
/// slot
///
/// Implement `HasSlot<K>` for a record field.
/// `Option<String>` members use the plain form; `String` members add `: String`.
///
/// ```ignore
/// shortid::slot!(DemoModel, DemoId => id);
/// shortid::slot!(DemoModel, DemoName => name: String);
/// ```
///

#[macro_export]
macro_rules! slot {
    ($entity:ty, $key:ty => $member:ident : String) => {
        impl $crate::traits::HasSlot<$key> for $entity {
            fn slot(&self) -> Option<&str> {
                Some(self.$member.as_str())
            }

            fn set_slot(&mut self, value: String) {
                self.$member = value;
            }
        }
    };

    ($entity:ty, $key:ty => $member:ident) => {
        impl $crate::traits::HasSlot<$key> for $entity {
            fn slot(&self) -> Option<&str> {
                self.$member.as_deref()
            }

            fn set_slot(&mut self, value: String) {
                self.$member = Some(value);
            }
        }
    };
}
