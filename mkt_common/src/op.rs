/// Forwards an operator trait implementation to the single field of a newtype wrapper.
///
/// The `*_ref` forms implement the operator on borrowed operands, which matters for heap-backed inner types where
/// cloning every operand would be wasteful.
///
/// ```rust,ignore
/// op!(binary BigValue, Add, add);          // BigValue + BigValue
/// op!(binary_ref BigValue, Add, add);      // &BigValue + &BigValue
/// op!(inplace_ref BigValue, AddAssign, add_assign); // BigValue += &BigValue
/// ```
#[macro_export]
macro_rules! op {
    (binary $for_struct:ident, $impl_trait:ident, $impl_fn:ident) => {
        impl $impl_trait for $for_struct {
            type Output = Self;

            fn $impl_fn(self, rhs: Self) -> Self::Output {
                Self(self.0.$impl_fn(rhs.0))
            }
        }
    };

    (binary_ref $for_struct:ident, $impl_trait:ident, $impl_fn:ident) => {
        impl<'a> $impl_trait<&'a $for_struct> for &'a $for_struct {
            type Output = $for_struct;

            fn $impl_fn(self, rhs: &'a $for_struct) -> Self::Output {
                $for_struct((&self.0).$impl_fn(&rhs.0))
            }
        }
    };

    (inplace $for_struct:ident, $impl_trait:ident, $impl_fn:ident) => {
        impl $impl_trait for $for_struct {
            fn $impl_fn(&mut self, rhs: Self) {
                self.0.$impl_fn(rhs.0)
            }
        }
    };

    (inplace_ref $for_struct:ident, $impl_trait:ident, $impl_fn:ident) => {
        impl<'a> $impl_trait<&'a $for_struct> for $for_struct {
            fn $impl_fn(&mut self, rhs: &'a $for_struct) {
                self.0.$impl_fn(&rhs.0)
            }
        }
    };

    (unary $for_struct:ident, $impl_trait:ident, $impl_fn:ident) => {
        impl $impl_trait for $for_struct {
            type Output = Self;

            fn $impl_fn(self) -> Self::Output {
                Self(self.0.$impl_fn())
            }
        }
    };

    (unary_ref $for_struct:ident, $impl_trait:ident, $impl_fn:ident) => {
        impl $impl_trait for &$for_struct {
            type Output = $for_struct;

            fn $impl_fn(self) -> Self::Output {
                $for_struct((&self.0).$impl_fn())
            }
        }
    };
}
