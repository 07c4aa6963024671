use std::future::IntoFuture;

/// Infallible request conversion.
pub trait Intake<I>: 'static + Sync + Send {
    type To;
    fn emit(&self, input: I) -> Self::To;
}

/// Request conversion that validates its input.
pub trait TryIntake<I>: 'static + Sync + Send {
    type To;
    type Error;
    fn emit(&self, input: I) -> Result<Self::To, Self::Error>;
}

/// Turns a service result into a response.
pub trait Exhaust<I>: 'static + Sync + Send {
    type To;
    fn emit(&self, input: I) -> Self::To;
}

pub struct Controller<T, P> {
    transformer: T,
    presenter: P,
}

impl<T, P> Controller<T, P> {
    pub fn new(transformer: T, presenter: P) -> Self {
        Self {
            transformer,
            presenter,
        }
    }

    pub fn intake<I>(self, input: I) -> Transformed<P, T::To>
    where
        T: Intake<I>,
    {
        Transformed {
            transformed: self.transformer.emit(input),
            presenter: self.presenter,
        }
    }

    pub fn try_intake<I>(self, input: I) -> Result<Transformed<P, T::To>, T::Error>
    where
        T: TryIntake<I>,
    {
        Ok(Transformed {
            transformed: self.transformer.emit(input)?,
            presenter: self.presenter,
        })
    }
}

impl<P> Controller<(), P> {
    /// Runs a service call that takes no request data.
    pub async fn bypass<O, F, Fut, E>(self, f: F) -> Result<P::To, E>
    where
        P: Exhaust<O>,
        F: FnOnce() -> Fut,
        Fut: IntoFuture<Output = Result<O, E>>,
    {
        Ok(self.presenter.emit(f().await?))
    }
}

pub struct Transformed<P, D> {
    transformed: D,
    presenter: P,
}

impl<P, D> Transformed<P, D> {
    pub async fn handle<O, F, Fut, E>(self, f: F) -> Result<P::To, E>
    where
        P: Exhaust<O>,
        F: FnOnce(D) -> Fut,
        Fut: IntoFuture<Output = Result<O, E>>,
    {
        Ok(self.presenter.emit(f(self.transformed).await?))
    }
}

#[cfg(test)]
mod test {
    use super::{Controller, Exhaust, Intake, TryIntake};

    struct Doubler;

    impl Intake<i32> for Doubler {
        type To = i32;
        fn emit(&self, input: i32) -> i32 {
            input * 2
        }
    }

    impl TryIntake<&'static str> for Doubler {
        type To = i32;
        type Error = String;
        fn emit(&self, input: &'static str) -> Result<i32, String> {
            input.parse::<i32>().map(|n| n * 2).map_err(|e| e.to_string())
        }
    }

    struct Show;

    impl Exhaust<i32> for Show {
        type To = String;
        fn emit(&self, input: i32) -> String {
            format!("={input}")
        }
    }

    #[tokio::test]
    async fn pipes_input_through_service_and_presenter() {
        let shown = Controller::new(Doubler, Show)
            .intake(4)
            .handle(|n| async move { Ok::<_, ()>(n + 1) })
            .await
            .unwrap();
        assert_eq!(shown, "=9");

        let parsed = Controller::new(Doubler, Show)
            .try_intake("x")
            .map(|_| ());
        assert!(parsed.is_err());

        let bypassed = Controller::new((), Show)
            .bypass(|| async { Ok::<_, ()>(7) })
            .await
            .unwrap();
        assert_eq!(bypassed, "=7");
    }
}
